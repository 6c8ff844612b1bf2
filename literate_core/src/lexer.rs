use logos::Logos;
use snailquote::unescape;

/// Raw tokens produced by logos for the inside of a `{ ... }` declaration
/// line.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
enum RawToken {
	#[token("=")]
	Equals,
	#[regex(r"[ \t,]+")]
	Separator,
	#[regex(r"[A-Za-z0-9_][A-Za-z0-9_.\-/+]*")]
	Word,
	#[regex(r#""([^"\\]|\\.)*""#)]
	DoubleQuotedString,
	#[regex(r"'[^']*'")]
	SingleQuotedString,
}

/// A single `key=value` pair found on a declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attribute {
	pub key: String,
	pub value: String,
}

/// Tokenize a candidate declaration line into its attribute pairs.
///
/// Returns `None` when the line (ignoring its terminator) is not fully
/// wrapped in braces. Tokens that do not form a `key=value` pair are skipped,
/// so unknown syntax inside the braces never fails the scan.
pub(crate) fn tokenize_declaration(line: &str) -> Option<Vec<Attribute>> {
	let line = line.trim_end_matches(['\n', '\r']);
	let inner = line.strip_prefix('{')?.strip_suffix('}')?;
	let tokens: Vec<_> = RawToken::lexer(inner)
		.spanned()
		.filter(|(token, _)| *token != Ok(RawToken::Separator))
		.collect();

	let mut attributes = Vec::new();
	let mut cursor = 0;

	while cursor < tokens.len() {
		let window = &tokens[cursor..tokens.len().min(cursor + 3)];
		let [
			(Ok(RawToken::Word), key_span),
			(Ok(RawToken::Equals), _),
			(Ok(value_token), value_span),
		] = window
		else {
			cursor += 1;
			continue;
		};

		let key = &inner[key_span.clone()];
		let raw_value = &inner[value_span.clone()];
		let value = match value_token {
			RawToken::Word => Some(raw_value.to_string()),
			RawToken::DoubleQuotedString | RawToken::SingleQuotedString => {
				Some(unescape(raw_value).unwrap_or_else(|_| strip_quotes(raw_value).to_string()))
			}
			RawToken::Equals | RawToken::Separator => None,
		};

		match value {
			Some(value) if is_attribute_key(key) => {
				attributes.push(Attribute {
					key: key.to_string(),
					value,
				});
				cursor += 3;
			}
			_ => cursor += 1,
		}
	}

	Some(attributes)
}

fn is_attribute_key(key: &str) -> bool {
	key.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn strip_quotes(value: &str) -> &str {
	value
		.get(1..value.len().saturating_sub(1))
		.unwrap_or_default()
}
