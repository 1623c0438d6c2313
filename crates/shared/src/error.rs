use thiserror::Error;

/// Local score validation failure. Display text is the notice shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("すべての指標を入力してください。")]
    EmptyField,
    #[error("0から40までの整数を入力してください。")]
    OutOfRange,
}

impl ValidationError {
    pub fn notice(self) -> String {
        self.to_string()
    }
}
