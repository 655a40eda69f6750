use std::borrow::Cow;
use std::sync::Arc;

/// Provider name - mostly static constants ("bet365", "pinnacle", ...)
pub type ProviderName = Cow<'static, str>;

/// Provider-specific sport identifier discovered at runtime
pub type SportId = Arc<str>;
