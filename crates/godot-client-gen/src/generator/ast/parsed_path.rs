use strum::Display;

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PathParseError {
  #[strum(to_string = "unclosed '{{' at position {position} in segment '{segment}'")]
  UnclosedBrace { segment: String, position: usize },
  #[strum(to_string = "empty parameter '{{}}' in segment '{segment}'")]
  EmptyParameter { segment: String },
  #[strum(to_string = "unmatched '}}' at position {position} in segment '{segment}'")]
  UnmatchedClosingBrace { segment: String, position: usize },
  #[strum(to_string = "nested '{{' at position {position} in segment '{segment}'")]
  NestedBraces { segment: String, position: usize },
}

impl std::error::Error for PathParseError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
  Literal(String),
  Param(String),
  /// A segment mixing literal text and placeholders, e.g. `v{version}.json`.
  Mixed(Vec<SegmentPart>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SegmentPart {
  Literal(String),
  Param(String),
}

impl PathSegment {
  pub fn parse(segment: &str) -> Result<Self, PathParseError> {
    let mut parts = Self::tokenize(segment)?;

    if parts.len() > 1 {
      return Ok(Self::Mixed(parts));
    }

    Ok(match parts.pop() {
      None => Self::Literal(String::new()),
      Some(SegmentPart::Literal(lit)) => Self::Literal(lit),
      Some(SegmentPart::Param(name)) => Self::Param(name),
    })
  }

  fn params(&self) -> Vec<&str> {
    match self {
      Self::Literal(_) => vec![],
      Self::Param(name) => vec![name.as_str()],
      Self::Mixed(parts) => parts
        .iter()
        .filter_map(|part| match part {
          SegmentPart::Param(name) => Some(name.as_str()),
          SegmentPart::Literal(_) => None,
        })
        .collect(),
    }
  }

  fn tokenize(segment: &str) -> Result<Vec<SegmentPart>, PathParseError> {
    let mut parts = vec![];
    let mut rest = segment;
    let mut offset = 0;

    while !rest.is_empty() {
      let Some(open_pos) = rest.find('{') else {
        break;
      };

      if let Some(stray_close) = rest[..open_pos].find('}') {
        return Err(PathParseError::UnmatchedClosingBrace {
          segment: segment.to_string(),
          position: offset + stray_close,
        });
      }

      if open_pos > 0 {
        parts.push(SegmentPart::Literal(rest[..open_pos].to_string()));
      }

      let after_open = &rest[open_pos + 1..];
      let Some(close_pos) = after_open.find('}') else {
        return Err(PathParseError::UnclosedBrace {
          segment: segment.to_string(),
          position: offset + open_pos,
        });
      };

      if let Some(nested) = after_open[..close_pos].find('{') {
        return Err(PathParseError::NestedBraces {
          segment: segment.to_string(),
          position: offset + open_pos + 1 + nested,
        });
      }

      let param_name = &after_open[..close_pos];
      if param_name.is_empty() {
        return Err(PathParseError::EmptyParameter {
          segment: segment.to_string(),
        });
      }

      parts.push(SegmentPart::Param(param_name.to_string()));

      let consumed = open_pos + 1 + close_pos + 1;
      offset += consumed;
      rest = &rest[consumed..];
    }

    if let Some(stray_close) = rest.find('}') {
      return Err(PathParseError::UnmatchedClosingBrace {
        segment: segment.to_string(),
        position: offset + stray_close,
      });
    }

    if !rest.is_empty() {
      parts.push(SegmentPart::Literal(rest.to_string()));
    }

    Ok(parts)
  }
}

/// A validated URL path template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ParsedPath(pub Vec<PathSegment>);

impl ParsedPath {
  pub fn parse(path: &str) -> Result<Self, PathParseError> {
    let segments: Result<Vec<_>, _> = path
      .trim_start_matches('/')
      .split('/')
      .filter(|s| !s.is_empty())
      .map(PathSegment::parse)
      .collect();

    Ok(Self(segments?))
  }

  /// Placeholder names in template order.
  pub fn placeholders(&self) -> Vec<&str> {
    self.0.iter().flat_map(PathSegment::params).collect()
  }

  pub fn has_placeholder(&self, name: &str) -> bool {
    self.placeholders().contains(&name)
  }
}
