use std::convert::Infallible;

pub mod matrix;
pub mod monitor;
pub mod reporter;
pub mod rows;
pub mod scanner;
pub mod sequencer;
pub mod shift_register;
pub mod sim;
pub mod timing;

// Pin operations on this hardware cannot fail
#[inline]
pub(crate) fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
