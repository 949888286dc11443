use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

/// Host template/layout id used to inflate a native item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateRef(pub u32);

/// Opaque logging parameters attached to an external item.
///
/// The list never reads these; they are surfaced to handlers through
/// [`crate::ContentList::context_values`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoggingParams(pub BTreeMap<String, String>);

impl LoggingParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

/// Content rendered by the host itself from a template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NativeContent<N> {
    pub template: TemplateRef,
    pub payload: N,
    /// Horizontal padding the host applies on both sides of the native view.
    pub lateral_padding: u32,
}

/// Content rendered by an external renderer from opaque bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExternalContent {
    pub payload: Vec<u8>,
    pub logging_params: Option<LoggingParams>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContentKind<N> {
    Native(NativeContent<N>),
    External(ExternalContent),
}

/// One entry of a [`crate::ContentList`].
///
/// Items are identified by `key` alone. Two items with the same key are the same item as far as
/// reconciliation is concerned, whatever their payloads.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentItem<N = ()> {
    key: String,
    kind: ContentKind<N>,
    is_full_span: bool,
}

impl<N> ContentItem<N> {
    pub fn new(key: impl Into<String>, kind: ContentKind<N>) -> Self {
        Self {
            key: key.into(),
            kind,
            is_full_span: false,
        }
    }

    pub fn native(key: impl Into<String>, template: TemplateRef, payload: N) -> Self {
        Self::new(
            key,
            ContentKind::Native(NativeContent {
                template,
                payload,
                lateral_padding: 0,
            }),
        )
    }

    pub fn external(key: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        Self::new(
            key,
            ContentKind::External(ExternalContent {
                payload: payload.into(),
                logging_params: None,
            }),
        )
    }

    /// Marks the item as spanning every column of a multi-column layout.
    pub fn with_full_span(mut self, is_full_span: bool) -> Self {
        self.is_full_span = is_full_span;
        self
    }

    /// Attaches logging params. Ignored for native items.
    pub fn with_logging_params(mut self, params: LoggingParams) -> Self {
        if let ContentKind::External(external) = &mut self.kind {
            external.logging_params = Some(params);
        }
        self
    }

    /// Sets the lateral padding. Ignored for external items.
    pub fn with_lateral_padding(mut self, lateral_padding: u32) -> Self {
        if let ContentKind::Native(native) = &mut self.kind {
            native.lateral_padding = lateral_padding;
        }
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &ContentKind<N> {
        &self.kind
    }

    pub fn is_full_span(&self) -> bool {
        self.is_full_span
    }

    pub fn is_native(&self) -> bool {
        matches!(self.kind, ContentKind::Native(_))
    }

    pub fn as_native(&self) -> Option<&NativeContent<N>> {
        match &self.kind {
            ContentKind::Native(native) => Some(native),
            ContentKind::External(_) => None,
        }
    }

    pub fn as_external(&self) -> Option<&ExternalContent> {
        match &self.kind {
            ContentKind::External(external) => Some(external),
            ContentKind::Native(_) => None,
        }
    }

    pub fn logging_params(&self) -> Option<&LoggingParams> {
        self.as_external()
            .and_then(|external| external.logging_params.as_ref())
    }
}
