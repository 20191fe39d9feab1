use crate::context::ContextBundle;

/// Prefixes the rendered context sections to the raw prompt. With no context
/// the raw prompt passes through byte-for-byte.
pub fn compose(bundle: &ContextBundle, raw: &str) -> String {
    if bundle.is_empty() {
        return raw.to_string();
    }
    format!("{}{}", bundle.render(), raw)
}

/// Prompt with the context kept apart from the user request, for backends
/// that understand a system/user partition. The local runtime only accepts a
/// flat prompt string, so dispatch goes through `flatten`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemFramedPrompt {
    context: Option<String>,
    request: String,
}

impl SystemFramedPrompt {
    pub fn frame(bundle: &ContextBundle, raw: &str) -> Self {
        let context = if bundle.is_empty() {
            None
        } else {
            Some(bundle.render())
        };
        Self {
            context,
            request: raw.to_string(),
        }
    }

    pub fn system_instruction(&self) -> Option<String> {
        self.context.as_ref().map(|ctx| {
            format!("You are working in a project directory with the following context:\n\n{ctx}")
        })
    }

    pub fn flatten(&self) -> String {
        match &self.context {
            Some(ctx) => format!("{ctx}\n\nUser request: {}", self.request),
            None => self.request.clone(),
        }
    }
}
