//! Never block the host: every hook body runs behind this guard.
//!
//! Errors and panics become a message the caller turns into fallback
//! output. The process still exits 0.

use lifecycle_core::HookError;
use std::any::Any;
use std::fmt::Display;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

/// Runs `body`, converting an error or a panic into `Err(message)`.
pub fn catch<T>(body: impl FnOnce() -> Result<T, HookError>) -> Result<T, String> {
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(err.to_string()),
        Err(payload) => Err(format!("panic: {}", panic_message(payload.as_ref()))),
    }
}

/// Routes panic reports to the hook log instead of stderr.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        tracing::error!(panic = %info, "Hook panicked");
    }));
}

/// Writes one line of hook output to stdout. A closed pipe is logged, not fatal.
pub fn print(text: impl Display) {
    if let Err(err) = write_line(&mut io::stdout().lock(), &text) {
        tracing::warn!(error = %err, "Could not write hook output");
    }
}

/// Writes one line to stderr, same failure handling as [`print`].
pub fn print_err(text: impl Display) {
    if let Err(err) = write_line(&mut io::stderr().lock(), &text) {
        tracing::warn!(error = %err, "Could not write hook message");
    }
}

fn write_line(out: &mut impl Write, text: &impl Display) -> io::Result<()> {
    writeln!(out, "{}", text)?;
    out.flush()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifecycle_core::RootError;
    use std::path::PathBuf;

    #[test]
    fn success_passes_through() {
        assert_eq!(catch(|| Ok(7)), Ok(7));
    }

    #[test]
    fn errors_become_messages() {
        let result: Result<(), String> = catch(|| {
            Err(HookError::Root(RootError::NotDetermined {
                anchor: PathBuf::from("/x"),
            }))
        });
        assert!(result
            .unwrap_err()
            .starts_with("Could not determine project root"));
    }

    #[test]
    fn panics_become_messages() {
        let result: Result<(), String> = catch(|| panic!("boom"));
        assert_eq!(result.unwrap_err(), "panic: boom");

        let owned: Result<(), String> = catch(|| panic!("{} {}", "formatted", 1));
        assert_eq!(owned.unwrap_err(), "panic: formatted 1");
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_are_returned_not_raised() {
        let err = write_line(&mut ClosedPipe, &"context").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);

        let mut buffer = Vec::new();
        write_line(&mut buffer, &"context").unwrap();
        assert_eq!(buffer, b"context\n");
    }
}
