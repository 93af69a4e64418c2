/***************************************/
/*               Macros                */
/***************************************/

/// Unwraps a `Result` at the binary boundary, logging the error and exiting
/// the process on failure.
#[macro_export]
macro_rules! unwrap_or_exit {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(e) => {
                log::error!("ERROR: {}", e);
                std::process::exit(1);
            }
        }
    };
}
