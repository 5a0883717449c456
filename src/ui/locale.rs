use clap::ValueEnum;

/// Language of user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Lang {
    #[default]
    En,
    Zh,
}

/// Message catalogue for the shell and the viewport. The assembly pipeline
/// never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub lang: Lang,
    pub files_title: &'static str,
    pub search_title: &'static str,
    pub help: &'static [(&'static str, &'static str)],
    pub no_files: &'static str,
    pub nothing_selected: &'static str,
    pub cancelled: &'static str,
    pub copied: &'static str,
}

const EN: Messages = Messages {
    lang: Lang::En,
    files_title: "Files",
    search_title: "Search",
    help: &[
        ("↑/↓", "move"),
        ("Space", "toggle"),
        ("d", "directory"),
        ("a/n", "all/none"),
        ("i", "invert"),
        ("t", "tests"),
        ("←/→", "fold"),
        ("e/c", "expand/collapse all"),
        ("/", "search"),
        ("Enter", "done"),
        ("q", "quit"),
    ],
    no_files: "no files found",
    nothing_selected: "no files selected",
    cancelled: "selection cancelled",
    copied: "copied to clipboard",
};

const ZH: Messages = Messages {
    lang: Lang::Zh,
    files_title: "文件",
    search_title: "搜索",
    help: &[
        ("↑/↓", "移动"),
        ("空格", "选择"),
        ("d", "目录"),
        ("a/n", "全选/全不选"),
        ("i", "反选"),
        ("t", "测试文件"),
        ("←/→", "折叠"),
        ("e/c", "全部展开/折叠"),
        ("/", "搜索"),
        ("回车", "完成"),
        ("q", "退出"),
    ],
    no_files: "未找到文件",
    nothing_selected: "未选择任何文件",
    cancelled: "已取消选择",
    copied: "已复制到剪贴板",
};

impl Messages {
    pub fn for_lang(lang: Lang) -> &'static Messages {
        match lang {
            Lang::En => &EN,
            Lang::Zh => &ZH,
        }
    }

    /// Status line of the viewport.
    pub fn status(
        &self,
        selected: usize,
        total: usize,
        tokens: &str,
    ) -> String {
        match self.lang {
            Lang::En => format!("{selected}/{total} files selected | {tokens} tokens"),
            Lang::Zh => format!("已选 {selected}/{total} 个文件 | {tokens} tokens"),
        }
    }

    /// One-line run summary printed after output is written.
    pub fn summary(
        &self,
        files: usize,
        tokens: &str,
        chunks: usize,
    ) -> String {
        match (self.lang, chunks) {
            (Lang::En, 0) => format!("packed {files} files, {tokens} tokens"),
            (Lang::En, n) => format!("packed {files} files, {tokens} tokens in {n} chunks"),
            (Lang::Zh, 0) => format!("已打包 {files} 个文件，共 {tokens} tokens"),
            (Lang::Zh, n) => format!("已打包 {files} 个文件，共 {tokens} tokens，分为 {n} 块"),
        }
    }

    pub fn excluded(
        &self,
        count: usize,
        remaining: i64,
    ) -> String {
        match self.lang {
            Lang::En => format!("{count} files over budget were left out ({remaining} tokens to spare)"),
            Lang::Zh => format!("{count} 个文件超出预算未包含（剩余 {remaining} tokens）"),
        }
    }

    pub fn wrote(
        &self,
        path: &str,
    ) -> String {
        match self.lang {
            Lang::En => format!("wrote {path}"),
            Lang::Zh => format!("已写入 {path}"),
        }
    }
}
