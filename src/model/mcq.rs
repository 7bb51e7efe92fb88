use thiserror::Error;

/// A generated multiple choice question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mcq {
    pub question: String,
    pub choices: Vec<String>,
    pub correct_answer: String,
}

/// Errors for malformed question blocks returned by the generation service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("question block {index} has {line_count} lines; a question and an answer are required")]
    TooFewLines { index: usize, line_count: usize },
}

/// Parses the service's question blocks into [`Mcq`] records.
///
/// Each block is split on `\n` exactly as received: the first line is the
/// question, the last line is the answer, and everything between is the
/// choice list. A block with fewer than two lines cannot carry both a
/// question and an answer and is rejected with the block's index.
pub fn parse_mcqs(blocks: &[String]) -> Result<Vec<Mcq>, ParseError> {
    blocks
        .iter()
        .enumerate()
        .map(|(index, block)| parse_block(index, block))
        .collect()
}

fn parse_block(index: usize, block: &str) -> Result<Mcq, ParseError> {
    let lines: Vec<&str> = block.split('\n').collect();
    if lines.len() < 2 {
        return Err(ParseError::TooFewLines {
            index,
            line_count: lines.len(),
        });
    }
    Ok(Mcq {
        question: lines[0].to_string(),
        choices: lines[1..lines.len() - 1]
            .iter()
            .map(|line| line.to_string())
            .collect(),
        correct_answer: lines[lines.len() - 1].to_string(),
    })
}
