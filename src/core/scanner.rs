use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceLanguage {
    Python,
}

impl SourceLanguage {
    pub fn name(self) -> &'static str {
        match self {
            SourceLanguage::Python => "python",
        }
    }

    pub fn default_extensions(self) -> &'static [&'static str] {
        match self {
            SourceLanguage::Python => &["py"],
        }
    }
}

/// Decides which digest paths get parsed, by file extension.
#[derive(Debug, Clone)]
pub struct FileScanner {
    suffixes: BTreeMap<String, SourceLanguage>,
}

impl FileScanner {
    pub fn new() -> Self {
        let mut scanner = Self {
            suffixes: BTreeMap::new(),
        };
        let language = SourceLanguage::Python;
        scanner.register(language, language.default_extensions());
        scanner
    }

    /// Replace the Python extension list (given with or without the leading dot)
    pub fn with_python_extensions<S: AsRef<str>>(mut self, extensions: &[S]) -> Self {
        self.suffixes
            .retain(|_, language| *language != SourceLanguage::Python);
        self.register(SourceLanguage::Python, extensions);
        self
    }

    fn register<S: AsRef<str>>(&mut self, language: SourceLanguage, extensions: &[S]) {
        for extension in extensions {
            let extension = extension.as_ref().trim().trim_start_matches('.');
            if extension.is_empty() {
                continue;
            }
            self.suffixes.insert(format!(".{extension}"), language);
        }
    }

    /// Language of a digest path, matched case-sensitively on its suffix
    pub fn detect_language(&self, path: &str) -> Option<SourceLanguage> {
        self.suffixes
            .iter()
            .find(|(suffix, _)| path.ends_with(suffix.as_str()))
            .map(|(_, language)| *language)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.suffixes.keys().map(|suffix| &suffix[1..])
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
