// Sequential chunk builder: order-preserving, token-bounded
use crate::context::types::ScannedFile;
use crate::tokenizer::format_tokens;

/// One group of files sized for a single model turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub index: usize,
    /// Number of chunks in the run; identical on every chunk.
    pub total: usize,
    pub files: Vec<ScannedFile>,
    pub tokens: usize,
}

impl Chunk {
    /// `Chunk <n>/<total> | <count> files | <tokens> tokens`, 1-based.
    pub fn header(&self) -> String {
        format!(
            "Chunk {}/{} | {} files | {} tokens",
            self.index + 1,
            self.total,
            self.files.len(),
            format_tokens(self.tokens)
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChunkOptions {
    pub max_tokens_per_chunk: usize,
    /// Trailing files of a flushed chunk repeated at the head of the next.
    pub overlap: usize,
}

/// Files collected for the chunk under construction.
#[derive(Default)]
struct Accumulator {
    files: Vec<ScannedFile>,
    tokens: usize,
    /// How many leading files are overlap repeats.
    seeded: usize,
}

impl Accumulator {
    fn push(
        &mut self,
        file: &ScannedFile,
    ) {
        self.tokens += file.tokens();
        self.files.push(file.clone());
    }

    fn has_new_files(&self) -> bool {
        self.files.len() > self.seeded
    }
}

/// Partitions `files` into ordered chunks in a single left-to-right pass.
///
/// A file larger than the ceiling always gets a chunk to itself. When a file
/// does not fit the current chunk, that chunk is closed and the next one
/// starts with its last `overlap` files, trimmed from the front until the new
/// file fits beside them. `total` is filled in once the pass is over.
pub fn split(
    files: &[ScannedFile],
    options: &ChunkOptions,
) -> Vec<Chunk> {
    let limit = options.max_tokens_per_chunk;
    let mut chunks = Vec::<Chunk>::new();
    let mut current = Accumulator::default();

    // Closes the accumulator as a chunk, unless it only holds repeats.
    let mut push_chunk = |acc: &mut Accumulator| -> Vec<ScannedFile> {
        let acc = std::mem::take(acc);
        if !acc.has_new_files() {
            return Vec::new();
        }
        let idx = chunks.len();
        chunks.push(Chunk {
            index: idx,
            total: 0,
            files: acc.files.clone(),
            tokens: acc.tokens,
        });
        acc.files
    };

    for file in files {
        let file_tok = file.tokens();

        // oversize file: isolate it
        if file_tok > limit {
            push_chunk(&mut current);
            let mut single = Accumulator::default();
            single.push(file);
            push_chunk(&mut single);
            continue;
        }

        // fits entirely in current chunk
        if current.tokens + file_tok <= limit {
            current.push(file);
            continue;
        }

        // start a new chunk seeded with the tail of the one just closed
        let flushed = push_chunk(&mut current);
        let keep = options.overlap.min(flushed.len());
        let mut seeds = &flushed[flushed.len() - keep..];
        while !seeds.is_empty()
            && seeds.iter().map(ScannedFile::tokens).sum::<usize>() + file_tok > limit
        {
            seeds = &seeds[1..];
        }
        for seed in seeds {
            current.push(seed);
        }
        current.seeded = seeds.len();
        current.push(file);
    }
    push_chunk(&mut current);

    let total = chunks.len();
    for chunk in &mut chunks {
        chunk.total = total;
    }
    tracing::debug!(chunks = total, limit, overlap = options.overlap, "split into chunks");
    chunks
}
