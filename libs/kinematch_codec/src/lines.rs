use crate::error::CodecError;

use serde::de::DeserializeOwned;
use std::io::BufRead;

/// Iterates the meaningful lines of a JSON Lines document, alongside
/// their 1-based line number. Blank lines and `#` comments are skipped.
pub fn content_lines<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<(usize, String), CodecError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(index, line)| match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    None
                } else {
                    Some(Ok((index + 1, trimmed.to_string())))
                }
            }
            Err(err) => Some(Err(CodecError::from(err))),
        })
}

/// Decodes every meaningful line of the document as a `T`.
pub fn decode_lines<R: BufRead, T: DeserializeOwned>(reader: R) -> Result<Vec<T>, CodecError> {
    content_lines(reader)
        .map(|line| {
            let (number, content) = line?;
            serde_json::from_str(&content).map_err(|source| CodecError::Json {
                line: number,
                source,
            })
        })
        .collect()
}
