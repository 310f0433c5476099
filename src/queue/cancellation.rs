//! Cancellation ownership of a queue
//!
//! Fixed at construction: either the queue owns a stop source and may stop
//! itself, or it was handed a token and shutdown belongs to whoever owns the
//! matching source.

use crate::core::shutdown::{StopSource, StopToken};

#[derive(Debug)]
pub(crate) enum Cancellation {
    Owned { source: StopSource, token: StopToken },
    Borrowed(StopToken),
}

impl Cancellation {
    pub(crate) fn owned() -> Self {
        let source = StopSource::new();
        let token = source.token();
        Self::Owned { source, token }
    }

    pub(crate) fn borrowed(token: StopToken) -> Self {
        Self::Borrowed(token)
    }

    pub(crate) fn token(&self) -> &StopToken {
        match self {
            Self::Owned { token, .. } | Self::Borrowed(token) => token,
        }
    }

    /// Request a stop through the owned source; a borrowed token cannot be stopped from here
    pub(crate) fn request_stop(&self) -> bool {
        match self {
            Self::Owned { source, .. } => source.request_stop(),
            Self::Borrowed(_) => false,
        }
    }

    pub(crate) fn is_owned(&self) -> bool {
        matches!(self, Self::Owned { .. })
    }
}
