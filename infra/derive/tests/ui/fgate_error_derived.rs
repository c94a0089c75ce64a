use fgate_derive::fgate_error;
use std::borrow::Cow;

#[fgate_error]
#[derive(Debug)]
pub(crate) enum QuietError {
    #[error("Quiet{}: {message}", format_context(.context))]
    Quiet { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err: Result<(), QuietError> =
        Err(QuietError::Quiet { message: "shh".into(), context: None });
    let _ = err.context("still quiet");
}
