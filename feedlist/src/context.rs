use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use core::any::Any;
use core::fmt;

use crate::LoggingParams;

/// Reserved context key under which an item's own logging params are exposed.
pub const LOGGING_PARAMETERS_KEY: &str = "feed-logging-parameters";

/// An opaque host object (click handler, action delegate, ...) shared by every item.
pub type Handler = Rc<dyn Any>;

/// Store-wide handlers, by name.
pub type Handlers = BTreeMap<String, Handler>;

/// What [`crate::ContentList::context_values`] returns for one item.
pub type ContextValues = BTreeMap<String, ContextValue>;

#[derive(Clone)]
pub enum ContextValue {
    Handler(Handler),
    LoggingParams(LoggingParams),
}

impl ContextValue {
    pub fn as_handler(&self) -> Option<&Handler> {
        match self {
            Self::Handler(handler) => Some(handler),
            Self::LoggingParams(_) => None,
        }
    }

    /// Downcasts a handler value to its concrete type.
    pub fn downcast_handler<T: Any>(&self) -> Option<&T> {
        self.as_handler().and_then(|handler| handler.downcast_ref())
    }

    pub fn as_logging_params(&self) -> Option<&LoggingParams> {
        match self {
            Self::LoggingParams(params) => Some(params),
            Self::Handler(_) => None,
        }
    }
}

impl fmt::Debug for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Handler(_) => f.write_str("Handler(..)"),
            Self::LoggingParams(params) => f.debug_tuple("LoggingParams").field(params).finish(),
        }
    }
}

pub(crate) fn merge(
    handlers: &Handlers,
    logging_params: Option<&LoggingParams>,
) -> ContextValues {
    let mut values: ContextValues = handlers
        .iter()
        .map(|(name, handler)| (name.clone(), ContextValue::Handler(Rc::clone(handler))))
        .collect();
    if let Some(params) = logging_params {
        values.insert(
            String::from(LOGGING_PARAMETERS_KEY),
            ContextValue::LoggingParams(params.clone()),
        );
    }
    values
}
