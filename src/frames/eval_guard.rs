//! Hard bound on the recursion depth of frame and body evaluations.
//!
//! Every recursive step (a frame orientation, a body position or velocity) holds an
//! [`EvalGuard`] for its duration. The guards count the current depth per thread; entering
//! beyond [`MAX_EVALUATION_DEPTH`] fails with [`StarframeError::FrameRecursionLimit`], which
//! turns a cyclic frame graph into an error instead of a stack overflow.

use std::{cell::Cell, marker::PhantomData};

use crate::{constants::MAX_EVALUATION_DEPTH, starframe_errors::StarframeError};

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// RAII token for one level of evaluation depth on the current thread.
#[derive(Debug)]
pub struct EvalGuard {
    // tied to the thread-local counter
    _not_send: PhantomData<*const ()>,
}

impl EvalGuard {
    pub fn enter() -> Result<Self, StarframeError> {
        DEPTH.with(|depth| {
            let current = depth.get();
            if current >= MAX_EVALUATION_DEPTH {
                Err(StarframeError::FrameRecursionLimit(MAX_EVALUATION_DEPTH))
            } else {
                depth.set(current + 1);
                Ok(EvalGuard {
                    _not_send: PhantomData,
                })
            }
        })
    }

    /// Current evaluation depth on this thread.
    pub fn depth() -> usize {
        DEPTH.with(Cell::get)
    }
}

impl Drop for EvalGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}
