use std::path::Path;

use crate::error::LoadError;

/// Contents of an NPC dialog file.
///
/// ```text
/// line 1: Hello there!~Lovely weather.~Bye.   (lines, split on '~')
/// line 2: options
/// line 3: reward
/// ```
/// Options and reward are carried along but nothing acts on them yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialogScript {
    pub lines: Vec<String>,
    pub options: String,
    pub reward: String,
}

impl DialogScript {
    /// Never fails: missing lines become empty strings.
    pub fn parse(text: &str) -> Self {
        let mut rows = text.split('\n').map(|row| row.strip_suffix('\r').unwrap_or(row));
        let lines = rows
            .next()
            .unwrap_or_default()
            .split('~')
            .map(str::to_owned)
            .collect();
        let options = rows.next().unwrap_or_default().to_owned();
        let reward = rows.next().unwrap_or_default().to_owned();
        Self { lines, options, reward }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Ok(Self::parse(&text))
    }
}
