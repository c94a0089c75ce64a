use fgate_derive::fgate_error;
use std::borrow::Cow;

#[fgate_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Missing plugin{}: {name}", format_context(.context))]
    Missing { name: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<()> {
    let io: std::result::Result<(), std::io::Error> = Ok(());
    io.context("reading manifest")?;
    Err("boom".into())
}

fn main() {
    let _ = read();
}
