//! Line input.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Reads one line from `reader`, or `None` at end of input.
///
/// Keep the same reader across calls: anything read past the first line
/// stays in its buffer, and piped input usually arrives in one chunk.
pub async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> Option<String> {
    let mut line = String::new();

    match reader.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
