//! Positional call templates: `startswith({0},{1})`, `{0}.any({1})`.
//!
//! `{N}` is replaced by the N-th rendered argument; `{{` and `}}` produce
//! literal braces.

use crate::error::TemplateError;

pub fn render_template(template: &str, args: &[String]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len() + args.iter().map(String::len).sum::<usize>());
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut index = String::new();
                let mut closed = false;
                for (_, d) in chars.by_ref() {
                    if d == '}' {
                        closed = true;
                        break;
                    }
                    index.push(d);
                }
                let index = match (closed, index.parse::<usize>()) {
                    (true, Ok(i)) => i,
                    _ => {
                        return Err(TemplateError::Unterminated {
                            template: template.to_string(),
                            position: pos,
                        });
                    }
                };
                let arg = args.get(index).ok_or_else(|| TemplateError::MissingArgument {
                    template: template.to_string(),
                    index,
                    available: args.len(),
                })?;
                out.push_str(arg);
            }
            other => out.push(other),
        }
    }
    Ok(out)
}
