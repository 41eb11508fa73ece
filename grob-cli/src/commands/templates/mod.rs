pub mod app;
pub mod module;
pub mod project;

pub use grob_edit::ident::capitalize;

/// A named piece of Go source with `{{Key}}` placeholders.
///
/// A placeholder may pipe its value through one function:
/// `{{ModuleName | Title}}` capitalizes the first letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub text: &'static str,
}

impl Template {
    pub const fn new(name: &'static str, text: &'static str) -> Self {
        Self { name, text }
    }

    pub fn render(&self, vars: &[(&str, &str)]) -> Result<String, TemplateError> {
        render(self, vars)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateError {
    #[error("template '{template}': unclosed placeholder at byte {offset}")]
    Unclosed { template: &'static str, offset: usize },
    #[error("template '{template}': malformed placeholder '{placeholder}'")]
    Malformed {
        template: &'static str,
        placeholder: String,
    },
    #[error("template '{template}': unknown function '{function}'")]
    UnknownFunction {
        template: &'static str,
        function: String,
    },
    #[error("template '{template}': undefined key '{key}'")]
    UndefinedKey { template: &'static str, key: String },
}

#[derive(Debug, Clone, Copy)]
enum Function {
    Title,
}

#[derive(Debug)]
enum Segment<'t> {
    Text(&'t str),
    Placeholder {
        key: &'t str,
        function: Option<Function>,
    },
}

/// Render `template`, replacing each placeholder with its value from `vars`.
///
/// The whole template is scanned before substitution, so a malformed
/// template fails even when `vars` is empty.
pub fn render(template: &Template, vars: &[(&str, &str)]) -> Result<String, TemplateError> {
    let segments = parse(template)?;
    let mut output = String::with_capacity(template.text.len());
    for segment in segments {
        match segment {
            Segment::Text(text) => output.push_str(text),
            Segment::Placeholder { key, function } => {
                let value = vars
                    .iter()
                    .find(|(name, _)| *name == key)
                    .map(|(_, value)| *value)
                    .ok_or_else(|| TemplateError::UndefinedKey {
                        template: template.name,
                        key: key.to_string(),
                    })?;
                match function {
                    None => output.push_str(value),
                    Some(Function::Title) => output.push_str(&capitalize(value)),
                }
            }
        }
    }
    Ok(output)
}

fn parse(template: &Template) -> Result<Vec<Segment<'static>>, TemplateError> {
    let mut segments = Vec::new();
    let mut rest = template.text;
    let mut offset = 0;

    while let Some(open) = rest.find("{{") {
        if open > 0 {
            segments.push(Segment::Text(&rest[..open]));
        }
        let inner_start = open + 2;
        let close = rest[inner_start..]
            .find("}}")
            .ok_or(TemplateError::Unclosed {
                template: template.name,
                offset: offset + open,
            })?;
        let raw = &rest[inner_start..inner_start + close];
        segments.push(placeholder(template, raw)?);

        let consumed = inner_start + close + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }
    Ok(segments)
}

fn placeholder(template: &Template, raw: &'static str) -> Result<Segment<'static>, TemplateError> {
    let (key, function) = match raw.split_once('|') {
        Some((key, function)) => (key.trim(), Some(function.trim())),
        None => (raw.trim(), None),
    };

    let valid_key =
        !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid_key {
        return Err(TemplateError::Malformed {
            template: template.name,
            placeholder: raw.to_string(),
        });
    }

    let function = match function {
        None => None,
        Some("Title") => Some(Function::Title),
        Some(other) => {
            return Err(TemplateError::UnknownFunction {
                template: template.name,
                function: other.to_string(),
            })
        }
    };
    Ok(Segment::Placeholder { key, function })
}
