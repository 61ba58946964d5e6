use core::cell::Cell;
use keycalc::Binding;
use keycalc_core::binding::{Resolver, builtins::BUILTINS};
use keycalc_core::lexer::{Lexer, Token};
use nu_ansi_term::{Color, Style};
use reedline::StyledText;

const PLAIN: Color = Color::White;
const NUMBER: Color = Color::Cyan;
const VARIABLE: Color = Color::Red;
const FUNCTION: Color = Color::Blue;
const OPERATOR: Color = Color::Magenta;
const ERROR: Color = Color::LightRed;

/// Colors a formula with the same lexer the compiler uses, so anything shown
/// in the error color would fail to compile.
pub struct Highlighter {
    variables: Vec<(String, Cell<f64>)>,
}

impl Highlighter {
    /// `variables` are the names bound on the command line.
    pub fn new(variables: impl IntoIterator<Item = String>) -> Self {
        Self {
            variables: variables
                .into_iter()
                .map(|name| (name, Cell::new(0.0)))
                .collect(),
        }
    }
}

impl reedline::Highlighter for Highlighter {
    fn highlight(&self, line: &str, _: usize) -> StyledText {
        let mut output = StyledText::new();
        if line.starts_with(':') {
            output.push((Style::new().fg(PLAIN).bold(), line.to_string()));
            return output;
        }

        let bindings: Vec<Binding<'_>> = self
            .variables
            .iter()
            .map(|(name, cell)| Binding::variable(name, cell))
            .collect();
        let mut lexer = Lexer::new(line, Resolver::new(&bindings, BUILTINS));

        let mut curr_end = 0;
        loop {
            let token = lexer.next_token();
            let span = lexer.token_span().0;
            if span.start > curr_end {
                output.push((Style::new().fg(PLAIN), line[curr_end..span.start].to_string()));
                curr_end = span.start;
            }

            let fg = match token {
                Token::End => break,
                Token::Error(_) => {
                    let text = line.get(span.start..).unwrap_or_default().to_string();
                    output.push((Style::new().fg(ERROR).underline(), text));
                    return output;
                }
                Token::Number(_) => NUMBER,
                Token::Variable { .. } => VARIABLE,
                Token::Function(_) => FUNCTION,
                Token::Infix(_) => OPERATOR,
            };
            output.push((Style::new().fg(fg), line[span.clone()].to_string()));
            curr_end = span.end;
        }

        if curr_end < line.len() {
            output.push((Style::new().fg(PLAIN), line[curr_end..].to_string()));
        }
        output
    }
}
