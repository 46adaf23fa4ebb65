use std::{
    ffi::CString,
    fmt::{self, Debug},
    os::raw::{c_char, c_void},
};

/// Logging function the runtime hands to `Initialize`.
pub type SystemLog = unsafe extern "C" fn(message: *const c_char);

/// Sink for diagnostic messages addressed to the runtime user.
pub trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

impl<F> Logger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn log(&self, message: &str) {
        self(message)
    }
}

/// `Logger` forwarding to the runtime's `SystemLog` function.
#[derive(Clone, Copy)]
pub struct HostLog {
    function: SystemLog,
}

impl Debug for HostLog {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_tuple("HostLog")
            .field(&(self.function as *const c_void))
            .finish()
    }
}

impl HostLog {
    pub fn new(function: SystemLog) -> Self {
        HostLog { function }
    }

    /// Wraps opaque handle passed to `Initialize`.
    ///
    /// Returns `None` for null handle.
    ///
    /// # Safety
    ///
    /// Non-null `handle` must be a function pointer of `SystemLog` signature
    /// that stays valid while returned value is in use.
    pub unsafe fn from_handle(handle: *mut c_void) -> Option<Self> {
        if handle.is_null() {
            None
        } else {
            Some(HostLog::new(std::mem::transmute::<*mut c_void, SystemLog>(
                handle,
            )))
        }
    }
}

impl Logger for HostLog {
    fn log(&self, message: &str) {
        // Interior NULs would cut the message short on the other side.
        let message = match CString::new(message) {
            Ok(message) => message,
            Err(err) => {
                let mut bytes = err.into_vec();
                bytes.retain(|&b| b != 0);
                match CString::new(bytes) {
                    Ok(message) => message,
                    Err(_) => return,
                }
            }
        };

        unsafe {
            // Validity of the function is guaranteed by the constructor's
            // caller.
            (self.function)(message.as_ptr())
        }
    }
}
