/// `%(name)s` reference expansion for option values

use std::collections::BTreeMap;

use crate::error::{IniError, Result};

/// Deepest chain of references followed before giving up
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Expand every reference in `value`, looking names up in `vars`
pub(crate) fn interpolate(
    section: &str,
    option: &str,
    value: &str,
    vars: &BTreeMap<String, String>,
) -> Result<String> {
    let mut out = String::with_capacity(value.len());
    Expander { section, option, vars }.expand(value, &mut out, 1)?;
    Ok(out)
}

struct Expander<'a> {
    section: &'a str,
    option: &'a str,
    vars: &'a BTreeMap<String, String>,
}

impl Expander<'_> {
    fn expand(&self, value: &str, out: &mut String, depth: usize) -> Result<()> {
        if depth > MAX_INTERPOLATION_DEPTH {
            return Err(IniError::InterpolationDepth {
                section: self.section.to_string(),
                option: self.option.to_string(),
            });
        }

        let mut rest = value;
        while let Some(pos) = rest.find('%') {
            out.push_str(&rest[..pos]);
            rest = &rest[pos..];

            if let Some(after) = rest.strip_prefix("%%") {
                out.push('%');
                rest = after;
            } else if rest.starts_with("%(") {
                let (name, after) = self.reference(rest)?;
                let target = self.vars.get(name).ok_or_else(|| IniError::MissingReference {
                    section: self.section.to_string(),
                    option: self.option.to_string(),
                    reference: name.to_string(),
                })?;

                if target.contains('%') {
                    self.expand(target, out, depth + 1)?;
                } else {
                    out.push_str(target);
                }
                rest = after;
            } else {
                return Err(self.syntax(format!("'%' must be followed by '%' or '(', found: '{}'", rest)));
            }
        }
        out.push_str(rest);
        Ok(())
    }

    /// Split `%(name)s...` into `name` and the text after the reference
    fn reference<'v>(&self, text: &'v str) -> Result<(&'v str, &'v str)> {
        let body = &text[2..];
        let close = body
            .find(')')
            .filter(|&close| close > 0 && body[close + 1..].starts_with('s'))
            .ok_or_else(|| self.syntax(format!("bad interpolation variable reference '{}'", text)))?;
        Ok((&body[..close], &body[close + 2..]))
    }

    fn syntax(&self, message: String) -> IniError {
        IniError::InterpolationSyntax {
            section: self.section.to_string(),
            option: self.option.to_string(),
            message,
        }
    }
}
