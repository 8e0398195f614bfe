/// Lexical class of a token.
///
/// The tokenizer distinguishes exactly the classes the validation stages
/// need: words (candidate keywords and identifiers), string literals and
/// quoted identifiers (so separators and keywords inside them are never
/// misread), comments (so nothing can hide inside them), and punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Unquoted identifier or keyword: `[A-Za-z_][A-Za-z0-9_$]*`.
    Word,
    /// Numeric literal (leading digit; digits and dots consumed greedily).
    Number,
    /// Single-quoted string literal, `''` escapes included.
    StringLiteral,
    /// Double-quoted identifier, `""` escapes included.
    QuotedIdentifier,
    /// `-- ...` to end of line.
    LineComment,
    /// `/* ... */`, unterminated runs to end of input.
    BlockComment,
    /// Run of whitespace characters.
    Whitespace,
    /// Any single character not covered by the classes above.
    Punct,
}

/// A token: its class plus the exact slice of the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Lexical class.
    pub kind: TokenKind,
    /// Verbatim text of the token.
    pub text: &'a str,
    /// Byte offset of the token in the scanned text.
    pub start: usize,
}

impl Token<'_> {
    /// True for tokens that carry no content for matching purposes.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }
}

fn is_word_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_word_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

/// Split `input` into tokens. Never fails: every byte sequence tokenizes,
/// with unterminated literals and comments running to end of input.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, ch)) = chars.next() {
        let (kind, end) = match ch {
            '\'' => (
                TokenKind::StringLiteral,
                scan_quoted(input, &mut chars, '\''),
            ),
            '"' => (
                TokenKind::QuotedIdentifier,
                scan_quoted(input, &mut chars, '"'),
            ),
            '-' if matches!(chars.peek(), Some((_, '-'))) => {
                chars.next();
                let mut end = input.len();
                while let Some((idx, c)) = chars.peek().copied() {
                    if c == '\n' {
                        end = idx;
                        break;
                    }
                    chars.next();
                }
                (TokenKind::LineComment, end)
            }
            '/' if matches!(chars.peek(), Some((_, '*'))) => {
                chars.next();
                let mut end = input.len();
                let mut previous_was_star = false;
                for (idx, c) in chars.by_ref() {
                    if previous_was_star && c == '/' {
                        end = idx + c.len_utf8();
                        break;
                    }
                    previous_was_star = c == '*';
                }
                (TokenKind::BlockComment, end)
            }
            c if c.is_whitespace() => {
                let mut end = input.len();
                while let Some((idx, c)) = chars.peek().copied() {
                    if c.is_whitespace() {
                        chars.next();
                    } else {
                        end = idx;
                        break;
                    }
                }
                (TokenKind::Whitespace, end)
            }
            c if is_word_start(c) => {
                let mut end = input.len();
                while let Some((idx, c)) = chars.peek().copied() {
                    if is_word_continue(c) {
                        chars.next();
                    } else {
                        end = idx;
                        break;
                    }
                }
                (TokenKind::Word, end)
            }
            c if c.is_ascii_digit() => {
                let mut end = input.len();
                while let Some((idx, c)) = chars.peek().copied() {
                    if c.is_ascii_digit() || c == '.' || is_word_continue(c) {
                        chars.next();
                    } else {
                        end = idx;
                        break;
                    }
                }
                (TokenKind::Number, end)
            }
            c => (TokenKind::Punct, start + c.len_utf8()),
        };

        tokens.push(Token {
            kind,
            text: &input[start..end],
            start,
        });
    }

    tokens
}

/// Consume a quoted run opened by `quote`, honoring doubled-quote escapes.
/// Returns the byte offset one past the closing quote (or end of input).
fn scan_quoted(
    input: &str,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    quote: char,
) -> usize {
    while let Some((idx, c)) = chars.next() {
        // peek() below requires manual iteration rather than a for loop.
        if c == quote {
            // Doubled quote is an escaped quote, not a terminator.
            if matches!(chars.peek(), Some((_, next)) if *next == quote) {
                chars.next();
                continue;
            }
            return idx + c.len_utf8();
        }
    }
    input.len()
}

/// Starting at an opening parenthesis in `tokens`, return the position one
/// past its matching close. `None` when the parentheses never balance.
pub fn skip_balanced(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        if token.kind == TokenKind::Punct {
            match token.text {
                "(" => depth += 1,
                ")" => {
                    depth = depth.checked_sub(1)?;
                    if depth == 0 {
                        return Some(idx + 1);
                    }
                }
                _ => {}
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn words_numbers_and_punctuation() {
        let tokens = tokenize("select a1, 42 from t");
        let words: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Word)
            .map(|t| t.text)
            .collect();
        assert_eq!(words, vec!["select", "a1", "from", "t"]);
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::Number && t.text == "42"));
    }

    #[test]
    fn string_literal_swallows_separator_and_escapes() {
        let tokens = tokenize("select 'a;b' , 'it''s'");
        let literals: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::StringLiteral)
            .map(|t| t.text)
            .collect();
        assert_eq!(literals, vec!["'a;b'", "'it''s'"]);
    }

    #[test]
    fn quoted_identifier_is_a_single_token() {
        let tokens = tokenize(r#"select * from "My.Table""#);
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::QuotedIdentifier && t.text == "\"My.Table\""));
    }

    #[test]
    fn line_comment_runs_to_newline() {
        let tokens = tokenize("select 1 -- trailing\nfrom t");
        let comment = tokens
            .iter()
            .find(|t| t.kind == TokenKind::LineComment)
            .expect("line comment token");
        assert_eq!(comment.text, "-- trailing");
        assert!(tokens
            .iter()
            .any(|t| t.kind == TokenKind::Word && t.text == "from"));
    }

    #[test]
    fn block_comment_and_unterminated_forms() {
        assert!(kinds("a /* b */ c").contains(&TokenKind::BlockComment));
        // Unterminated literal and comment both consume to end of input.
        let open_literal = tokenize("select 'oops");
        assert_eq!(open_literal.last().map(|t| t.kind), Some(TokenKind::StringLiteral));
        let open_comment = tokenize("select /* oops");
        assert_eq!(open_comment.last().map(|t| t.kind), Some(TokenKind::BlockComment));
    }

    #[test]
    fn tokens_reassemble_to_original_input() {
        let input = "SELECT x, 'a;b' /* c */ FROM \"T\" -- end";
        let rebuilt: String = tokenize(input).iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, input);
    }

    #[test]
    fn skip_balanced_tracks_nesting() {
        let tokens: Vec<Token<'_>> = tokenize("(a (b) c) d")
            .into_iter()
            .filter(|t| !t.is_trivia())
            .collect();
        let after = skip_balanced(&tokens, 0).expect("balanced parens");
        assert_eq!(tokens[after].text, "d");

        let unbalanced: Vec<Token<'_>> = tokenize("(a (b)").into_iter().collect();
        assert_eq!(skip_balanced(&unbalanced, 0), None);
    }
}
