use crate::context::types::ScannedFile;

/// Ceiling and preferences for [`fit`].
#[derive(Debug, Clone, Default)]
pub struct BudgetOptions {
    pub max_tokens: usize,
    pub reserve_tokens: usize,
    /// Substrings; a file whose path contains any of them is fitted first.
    pub priority_patterns: Vec<String>,
}

impl BudgetOptions {
    pub fn new(max_tokens: usize) -> Self {
        BudgetOptions {
            max_tokens,
            ..Default::default()
        }
    }

    /// `max_tokens - reserve_tokens`; negative when the reserve is larger.
    pub fn effective_ceiling(&self) -> i64 {
        self.max_tokens as i64 - self.reserve_tokens as i64
    }

    fn is_priority(
        &self,
        file: &ScannedFile,
    ) -> bool {
        self.priority_patterns
            .iter()
            .any(|p| !p.is_empty() && file.path.contains(p.as_str()))
    }
}

/// Outcome of [`fit`]: every input file lands in exactly one of the lists.
#[derive(Debug, Clone, Default)]
pub struct BudgetResult {
    pub included: Vec<ScannedFile>,
    pub excluded: Vec<ScannedFile>,
    pub total_tokens: usize,
    pub budget_used: usize,
    pub budget_remaining: i64,
}

/// Greedy fit under `max_tokens - reserve_tokens`.
///
/// Candidates are ordered priority-first, then by ascending token count (a
/// stable sort, so ties keep input order). The walk accepts each file that
/// still fits and excludes the rest; it never revisits an exclusion.
pub fn fit(
    files: &[ScannedFile],
    options: &BudgetOptions,
) -> BudgetResult {
    let ceiling = options.effective_ceiling();
    let mut order: Vec<(bool, &ScannedFile)> =
        files.iter().map(|f| (options.is_priority(f), f)).collect();
    order.sort_by(|(pa, a), (pb, b)| pb.cmp(pa).then(a.tokens().cmp(&b.tokens())));

    let mut result = BudgetResult::default();
    let mut used = 0i64;
    for (_, file) in order {
        let tokens = file.tokens() as i64;
        if used + tokens <= ceiling {
            used += tokens;
            result.included.push(file.clone());
        } else {
            result.excluded.push(file.clone());
        }
    }
    result.total_tokens = used as usize;
    result.budget_used = result.total_tokens;
    result.budget_remaining = ceiling - used;
    tracing::debug!(
        included = result.included.len(),
        excluded = result.excluded.len(),
        used = result.budget_used,
        ceiling,
        "budget fit"
    );
    result
}
