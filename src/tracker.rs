/// Statement-end marker. Checked on every line, including headers and rows,
/// because a block may close on the same line it does anything else on.
const TERMINATOR: &str = ");";

/// Classification of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Header of a block that still needs the derived column.
    HeaderActive,
    /// Header of a block that already carries the derived column.
    HeaderAugmented,
    /// Row inside an active block, candidate for extraction and rewrite.
    CandidateRow,
    /// Line inside an already-augmented block; copied through untouched.
    Passthrough,
    /// Any line outside a record block, or a non-row line inside one.
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Active,
    PassthroughBlock,
}

/// Tracks whether the scan is currently inside a record block and whether
/// that block has already been augmented.
///
/// The mode of a block is fixed at its header line and never flips
/// mid-block. The single-flag approach of treating "inside a block" and
/// "skip this block" as one boolean is deliberately avoided here.
pub struct BlockTracker {
    state: State,
    header_marker: String,
    column: String,
}

impl BlockTracker {
    pub fn new(table: &str, column: &str) -> Self {
        Self {
            state: State::Outside,
            header_marker: format!("INSERT INTO {}", table),
            column: column.to_string(),
        }
    }

    /// Classify a line and advance the state machine.
    pub fn classify(&mut self, line: &str) -> LineClass {
        let class = match self.state {
            State::Outside => {
                if line.contains(&self.header_marker) {
                    if line.contains(&self.column) {
                        self.state = State::PassthroughBlock;
                        LineClass::HeaderAugmented
                    } else {
                        self.state = State::Active;
                        LineClass::HeaderActive
                    }
                } else {
                    LineClass::Plain
                }
            }
            State::Active => {
                if line.trim_start().starts_with('(') {
                    LineClass::CandidateRow
                } else {
                    LineClass::Plain
                }
            }
            State::PassthroughBlock => LineClass::Passthrough,
        };

        if self.state != State::Outside && line.contains(TERMINATOR) {
            self.state = State::Outside;
        }

        class
    }

    /// A well-formed document ends outside any block. Returns a warning
    /// when it does not.
    pub fn finish(&self) -> Option<String> {
        match self.state {
            State::Outside => None,
            State::Active | State::PassthroughBlock => Some(format!(
                "Document ended inside an unterminated '{}' block",
                self.header_marker
            )),
        }
    }
}
