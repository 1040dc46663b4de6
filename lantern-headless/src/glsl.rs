//! Shallow GLSL checking.
//!
//! This is not a GLSL compiler. It catches the mistakes people actually make while following
//! lessons (missing `;`, unbalanced brackets, no `main`, empty sources, unterminated comments) and
//! extracts the uniforms a stage declares. Logs mimic the `0:<line>: error: ...` shape of common
//! drivers.
//!
//! Statements are free-form: one can span several lines and a line can hold several. A statement
//! ends at a `;`, or where a block opens or closes; text still pending when a block closes (or at
//! the end of the source) is a missing `;`.

/// A uniform declared at global scope.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct UniformDecl {
  pub(crate) name: String,
  /// Whether the name is referenced anywhere beyond its declaration; unused uniforms are not
  /// active once linked.
  pub(crate) used: bool,
}

/// Check `src` and return its global uniforms, or a compiler-like log.
pub(crate) fn check(src: &str) -> Result<Vec<UniformDecl>, String> {
  let src = strip_comments(src)?;

  if src.trim().is_empty() {
    return Err(error(0, "empty source"));
  }

  let mut brackets: Vec<(char, usize)> = Vec::new();
  let mut uniforms = Vec::new();
  let mut statement = String::new();
  // last line holding text of the pending statement
  let mut statement_line = 0;
  let mut last_line = 0;

  for (i, raw) in src.lines().enumerate() {
    let line_nb = i + 1;
    let line = raw.trim();

    if line.is_empty() || line.starts_with('#') {
      continue;
    }

    last_line = line_nb;

    for c in line.chars() {
      match c {
        '(' | '[' => brackets.push((c, line_nb)),

        ')' | ']' => close(&mut brackets, c, line_nb)?,

        '{' => {
          brackets.push((c, line_nb));
          statement.clear();
          continue;
        }

        '}' => {
          if !statement.trim().is_empty() {
            return Err(error(statement_line, "syntax error, missing ';'"));
          }

          close(&mut brackets, c, line_nb)?;
          statement.clear();
          continue;
        }

        ';' => {
          if brackets.is_empty() {
            if let Some(name) = uniform_name(&statement) {
              uniforms.push(name);
            }
          }

          statement.clear();
          continue;
        }

        _ => (),
      }

      if !c.is_whitespace() {
        statement_line = line_nb;
      }

      statement.push(c);
    }

    statement.push(' ');
  }

  if let Some(&(c, line_nb)) = brackets.last() {
    return Err(error(
      last_line.max(line_nb),
      &format!("syntax error, unclosed '{}'", c),
    ));
  }

  if !statement.trim().is_empty() {
    return Err(error(statement_line, "syntax error, missing ';'"));
  }

  let idents = identifiers(&src);

  if !idents.iter().any(|&ident| ident == "main") {
    return Err(error(0, "no definition of main"));
  }

  Ok(
    uniforms
      .into_iter()
      .map(|name| {
        let used = idents.iter().filter(|&&ident| ident == name).count() > 1;
        UniformDecl { name, used }
      })
      .collect(),
  )
}

fn error(line: usize, msg: &str) -> String {
  format!("0:{}: error: {}", line, msg)
}

fn close(brackets: &mut Vec<(char, usize)>, closing: char, line_nb: usize) -> Result<(), String> {
  match brackets.pop() {
    Some((open, _)) if open == opening(closing) => Ok(()),
    _ => Err(error(
      line_nb,
      &format!("syntax error, unexpected '{}'", closing),
    )),
  }
}

fn opening(closing: char) -> char {
  match closing {
    ')' => '(',
    '}' => '{',
    _ => '[',
  }
}

// Blank out `//` and `/* */` comments. Newlines inside block comments are kept so that line
// numbers still match the source.
fn strip_comments(src: &str) -> Result<String, String> {
  let mut stripped = String::with_capacity(src.len());
  let mut chars = src.chars();
  let mut line_nb = 1;

  while let Some(c) = chars.next() {
    let next = chars.clone().next();

    match (c, next) {
      ('/', Some('/')) => {
        for c in chars.by_ref() {
          if c == '\n' {
            stripped.push('\n');
            line_nb += 1;
            break;
          }
        }
      }

      ('/', Some('*')) => {
        chars.next();

        let start = line_nb;
        let mut closed = false;
        stripped.push(' ');

        while let Some(c) = chars.next() {
          if c == '\n' {
            stripped.push('\n');
            line_nb += 1;
          } else if c == '*' && chars.clone().next() == Some('/') {
            chars.next();
            closed = true;
            break;
          }
        }

        if !closed {
          return Err(error(start, "unterminated comment"));
        }
      }

      _ => {
        if c == '\n' {
          line_nb += 1;
        }

        stripped.push(c);
      }
    }
  }

  Ok(stripped)
}

// `uniform <type> <name>[N]` at global scope, without its `;`.
fn uniform_name(statement: &str) -> Option<String> {
  let mut tokens = statement.split_whitespace();

  if tokens.next()? != "uniform" {
    return None;
  }

  let _ty = tokens.next()?;
  let name = tokens.next()?;
  let name = name.split(|c| c == '[' || c == '=').next()?;

  if name.is_empty() {
    None
  } else {
    Some(name.to_owned())
  }
}

fn identifiers(src: &str) -> Vec<&str> {
  src
    .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
    .filter(|s| !s.is_empty())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  const FS: &str = "#version 330 core
out vec4 FragColor;
uniform vec4 u_Color;
uniform float u_Unused;

void main()
{
  FragColor = u_Color;
}";

  #[test]
  fn uniforms_and_their_use() {
    let uniforms = check(FS).unwrap();

    assert_eq!(
      uniforms,
      vec![
        UniformDecl {
          name: "u_Color".to_owned(),
          used: true
        },
        UniformDecl {
          name: "u_Unused".to_owned(),
          used: false
        },
      ]
    );
  }

  #[test]
  fn missing_semicolon_reports_its_line() {
    let src = "#version 330 core\nvoid main() {\n  gl_Position = vec4(0.0)\n}";
    assert_eq!(check(src), Err("0:3: error: syntax error, missing ';'".to_owned()));
  }

  #[test]
  fn unbalanced_brackets() {
    assert!(check("void main() {\n  int a = (1 + 2;\n}").is_err());
    assert!(check("void main() {\n  int a = 1;").is_err());
    assert!(check("void main() }").is_err());
  }

  #[test]
  fn main_is_required() {
    assert_eq!(
      check("void entry() {\n}"),
      Err("0:0: error: no definition of main".to_owned())
    );
  }

  #[test]
  fn empty_source_is_rejected() {
    assert!(check("").is_err());
    assert!(check("\n\n  \n").is_err());
  }

  #[test]
  fn multiline_calls_and_control_flow() {
    let src = "void main()
{
  vec4 c = vec4(
    1.0, 0.5,
    0.0, 1.0);
  if (c.r > 0.5)
    c.g = 0.0;
  else
    c.b = 1.0;
}";

    assert!(check(src).is_ok());
  }

  #[test]
  fn expressions_can_span_lines() {
    let src = "#version 330 core
layout (location = 0) in vec3 a_Position;
uniform mat4 u_View;
uniform mat4 u_Model;

void main()
{
  gl_Position = u_View *
    u_Model * vec4(a_Position, 1.0);
}";

    let uniforms = check(src).unwrap();
    assert!(uniforms.iter().all(|uniform| uniform.used));
  }

  #[test]
  fn block_comments_are_skipped() {
    let src = "#version 330 core
/* a vertex
   shader */
void main()
{
  gl_Position = vec4(0.0); /* inline */ gl_PointSize = 1.0;
}";

    assert!(check(src).is_ok());
  }

  #[test]
  fn line_numbers_survive_block_comments() {
    let src = "/* one
two */
void main() {
  gl_Position = vec4(0.0)
}";

    assert_eq!(check(src), Err("0:4: error: syntax error, missing ';'".to_owned()));
  }

  #[test]
  fn unterminated_comment_is_rejected() {
    assert_eq!(
      check("void main() {\n}\n/* oops"),
      Err("0:3: error: unterminated comment".to_owned())
    );
  }

  #[test]
  fn uniforms_named_only_in_comments_are_unused() {
    let src = "uniform vec4 u_Tint; // u_Tint is unused
uniform float u_Scale;
/* u_Scale too */
void main()
{
}";

    assert_eq!(
      check(src),
      Ok(vec![
        UniformDecl {
          name: "u_Tint".to_owned(),
          used: false
        },
        UniformDecl {
          name: "u_Scale".to_owned(),
          used: false
        },
      ])
    );
  }

  #[test]
  fn missing_semicolon_at_the_end_of_the_source() {
    assert_eq!(
      check("void main() {\n}\nint a = 1"),
      Err("0:3: error: syntax error, missing ';'".to_owned())
    );
  }

  #[test]
  fn uniform_arrays_are_named_without_their_size() {
    assert_eq!(uniform_name("uniform vec3 u_Lights[4];"), Some("u_Lights".to_owned()));
    assert_eq!(uniform_name("uniformity x;"), None);
  }
}
