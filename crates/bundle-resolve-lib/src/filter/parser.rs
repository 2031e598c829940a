use super::{Filter, FilterError};

pub(super) struct Parser<'a> {
	src: &'a str,
	chars: Vec<char>,
	pos: usize,
}

impl<'a> Parser<'a> {
	pub(super) fn new(src: &'a str) -> Self {
		Parser { src, chars: src.chars().collect(), pos: 0 }
	}

	pub(super) fn parse(mut self) -> Result<Filter, FilterError> {
		self.skip_whitespace();
		let filter = self.parse_filter()?;
		self.skip_whitespace();
		if self.pos != self.chars.len() {
			return Err(self.error("unexpected trailing characters"))
		}
		Ok(filter)
	}

	fn error(&self, message: &str) -> FilterError {
		FilterError { filter: self.src.to_string(), position: self.pos, message: message.to_string() }
	}

	fn peek(&self) -> Option<char> {
		self.chars.get(self.pos).copied()
	}

	fn skip_whitespace(&mut self) {
		while matches!(self.peek(), Some(c) if c.is_whitespace()) {
			self.pos += 1;
		}
	}

	fn expect(&mut self, c: char) -> Result<(), FilterError> {
		if self.peek() == Some(c) {
			self.pos += 1;
			Ok(())
		} else {
			Err(self.error(&format!("expected `{}`", c)))
		}
	}

	fn parse_filter(&mut self) -> Result<Filter, FilterError> {
		self.expect('(')?;
		self.skip_whitespace();
		let filter = match self.peek() {
			Some('&') => { self.pos += 1; Filter::And(self.parse_list()?) },
			Some('|') => { self.pos += 1; Filter::Or(self.parse_list()?) },
			Some('!') => {
				self.pos += 1;
				self.skip_whitespace();
				Filter::Not(Box::new(self.parse_filter()?))
			},
			Some(_) => self.parse_item()?,
			None => return Err(self.error("unexpected end of filter")),
		};
		self.skip_whitespace();
		self.expect(')')?;
		Ok(filter)
	}

	fn parse_list(&mut self) -> Result<Vec<Filter>, FilterError> {
		let mut children = Vec::new();
		self.skip_whitespace();
		while self.peek() == Some('(') {
			children.push(self.parse_filter()?);
			self.skip_whitespace();
		}
		if children.is_empty() {
			return Err(self.error("empty filter list"))
		}
		Ok(children)
	}

	fn parse_item(&mut self) -> Result<Filter, FilterError> {
		let start = self.pos;
		while let Some(c) = self.peek() {
			if matches!(c, '=' | '~' | '<' | '>' | '(' | ')') {
				break;
			}
			self.pos += 1;
		}
		let attr: String = self.chars[start..self.pos].iter().collect::<String>().trim().to_string();
		if attr.is_empty() {
			return Err(self.error("missing attribute name"))
		}

		let op = match self.peek() {
			Some('=') => { self.pos += 1; '=' },
			Some(c @ ('~' | '<' | '>')) => {
				self.pos += 1;
				self.expect('=')?;
				c
			},
			_ => return Err(self.error("expected comparison operator")),
		};

		let parts = self.parse_value()?;

		Ok(match op {
			'~' => Filter::Approx(attr, self.single(parts)?),
			'<' => Filter::LessEq(attr, self.single(parts)?),
			'>' => Filter::GreaterEq(attr, self.single(parts)?),
			_ => {
				if parts.len() == 1 {
					Filter::Equal(attr, parts.into_iter().next().unwrap_or_default())
				} else if parts.len() == 2 && parts.iter().all(String::is_empty) {
					Filter::Present(attr)
				} else {
					Filter::Substring(attr, parts)
				}
			},
		})
	}

	fn single(&self, parts: Vec<String>) -> Result<String, FilterError> {
		if parts.len() != 1 {
			return Err(self.error("wildcards are only allowed with `=`"))
		}
		Ok(parts.into_iter().next().unwrap_or_default())
	}

	/// Reads up to the closing parenthesis, splitting on unescaped `*`.
	fn parse_value(&mut self) -> Result<Vec<String>, FilterError> {
		let mut parts = vec![String::new()];
		loop {
			match self.peek() {
				None => return Err(self.error("unterminated value")),
				Some(')') => break,
				Some('(') => return Err(self.error("unescaped `(` in value")),
				Some('*') => {
					self.pos += 1;
					parts.push(String::new());
				},
				Some('\\') => {
					self.pos += 1;
					let c = self.peek().ok_or_else(|| self.error("dangling escape"))?;
					self.pos += 1;
					if let Some(last) = parts.last_mut() { last.push(c); }
				},
				Some(c) => {
					self.pos += 1;
					if let Some(last) = parts.last_mut() { last.push(c); }
				},
			}
		}
		Ok(parts)
	}
}
