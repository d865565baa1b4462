//! Host services reachable from composables: the platform context and the
//! toast API built on it.

#![allow(non_snake_case)]

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use compose_core::{staticCompositionLocalOf, StaticCompositionLocal};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ToastDuration {
    Short,
    Long,
}

impl ToastDuration {
    pub fn millis(self) -> u64 {
        match self {
            ToastDuration::Short => 2_000,
            ToastDuration::Long => 3_500,
        }
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.millis())
    }
}

/// A request to show a transient message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToastRequest {
    pub text: String,
    pub duration: ToastDuration,
}

/// Receives toast requests; implemented by the app shell and by test hosts.
pub trait ToastHost {
    fn post(&self, request: ToastRequest);
}

/// Handle to the host platform, the counterpart of an Android `Context`.
#[derive(Clone, Default)]
pub struct PlatformContext {
    toast_host: Option<Rc<dyn ToastHost>>,
}

impl PlatformContext {
    pub fn new(toast_host: Rc<dyn ToastHost>) -> Self {
        Self {
            toast_host: Some(toast_host),
        }
    }

    /// A context with no host attached; toasts shown through it are dropped.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn has_toast_host(&self) -> bool {
        self.toast_host.is_some()
    }

    pub(crate) fn post_toast(&self, request: ToastRequest) {
        match &self.toast_host {
            Some(host) => {
                log::info!("toast: {:?} ({:?})", request.text, request.duration);
                host.post(request);
            }
            None => log::warn!("no toast host attached; dropping {:?}", request.text),
        }
    }
}

impl PartialEq for PlatformContext {
    fn eq(&self, other: &Self) -> bool {
        match (&self.toast_host, &other.toast_host) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for PlatformContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformContext")
            .field("toast_host", &self.has_toast_host())
            .finish()
    }
}

thread_local! {
    static LOCAL_CONTEXT: StaticCompositionLocal<PlatformContext> =
        staticCompositionLocalOf(PlatformContext::detached);
}

pub fn LocalContext() -> StaticCompositionLocal<PlatformContext> {
    LOCAL_CONTEXT.with(Clone::clone)
}

/// A toast bound to a context, posted by [`Toast::show`].
#[derive(Debug)]
#[must_use = "a toast does nothing until `show` is called"]
pub struct Toast {
    context: PlatformContext,
    request: ToastRequest,
}

impl Toast {
    pub fn make_text(
        context: &PlatformContext,
        text: impl Into<String>,
        duration: ToastDuration,
    ) -> Self {
        Self {
            context: context.clone(),
            request: ToastRequest {
                text: text.into(),
                duration,
            },
        }
    }

    pub fn show(self) {
        self.context.post_toast(self.request);
    }
}
