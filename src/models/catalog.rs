//! The fixed set of summarization models offered in the form.

/// A model choice as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOption {
    /// Human-readable label shown in the model selector.
    pub label: &'static str,
    /// Backing model identifier passed to the inference API.
    pub identifier: &'static str,
}

static MODEL_OPTIONS: &[ModelOption] = &[
    ModelOption {
        label: "BART (Base)",
        identifier: "facebook/bart-base",
    },
    ModelOption {
        label: "T5 (Small)",
        identifier: "t5-small",
    },
    ModelOption {
        label: "Pegasus (XSUM)",
        identifier: "google/pegasus-xsum",
    },
];

/// All selectable models, in display order.
pub fn model_options() -> &'static [ModelOption] {
    MODEL_OPTIONS
}

/// The model selected when a session starts.
pub fn default_model() -> &'static ModelOption {
    &MODEL_OPTIONS[0]
}

/// Look up a model by its display label.
pub fn lookup_label(label: &str) -> Option<&'static ModelOption> {
    MODEL_OPTIONS.iter().find(|m| m.label == label)
}

/// Look up a model by its identifier.
pub fn lookup_identifier(identifier: &str) -> Option<&'static ModelOption> {
    MODEL_OPTIONS.iter().find(|m| m.identifier == identifier)
}
