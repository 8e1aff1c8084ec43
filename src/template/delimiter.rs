// ABOUTME: Delimiter configuration, validation and keyword pattern construction
// ABOUTME: Resolves bracket mirroring and rejects characters reserved for keyword names

use serde::{Deserialize, Serialize};

use super::error::{Result, TemplateError};

/// Raw delimiter configuration as supplied by a caller or a config file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelimiterConfig {
    #[serde(default = "default_kwd_delim")]
    pub kwd_delim: String,

    #[serde(default = "default_mod_delim")]
    pub mod_delim: String,

    #[serde(default = "default_param_delim")]
    pub param_delim: String,

    #[serde(default)]
    pub case_sensitive: bool,
}

fn default_kwd_delim() -> String {
    "{".to_string()
}

fn default_mod_delim() -> String {
    "^".to_string()
}

fn default_param_delim() -> String {
    ":".to_string()
}

impl Default for DelimiterConfig {
    fn default() -> Self {
        Self {
            kwd_delim: default_kwd_delim(),
            mod_delim: default_mod_delim(),
            param_delim: default_param_delim(),
            case_sensitive: false,
        }
    }
}

impl DelimiterConfig {
    pub fn new(
        kwd_delim: impl Into<String>,
        mod_delim: impl Into<String>,
        param_delim: impl Into<String>,
    ) -> Self {
        Self {
            kwd_delim: kwd_delim.into(),
            mod_delim: mod_delim.into(),
            param_delim: param_delim.into(),
            case_sensitive: false,
        }
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Validate the configuration and resolve it into a delimiter set
    pub fn validate(&self) -> Result<DelimiterSet> {
        DelimiterSet::try_from(self)
    }
}

/// Validated, immutable delimiter roles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterSet {
    start: char,
    end: char,
    modifier: char,
    param: char,
    case_sensitive: bool,
}

impl TryFrom<&DelimiterConfig> for DelimiterSet {
    type Error = TemplateError;

    fn try_from(config: &DelimiterConfig) -> Result<Self> {
        let (start, end) = resolve_keyword_pair(&config.kwd_delim)?;
        let modifier = single_char("mod_delim", &config.mod_delim)?;
        let param = single_char("param_delim", &config.param_delim)?;

        if modifier == start || modifier == end {
            return Err(TemplateError::configuration(
                "mod_delim",
                format!(
                    "'{}' cannot be the same as the keyword delimiters ('{}' or '{}')",
                    modifier, start, end
                ),
            ));
        }

        if param == start || param == end || param == modifier {
            return Err(TemplateError::configuration(
                "param_delim",
                format!(
                    "'{}' cannot be the same as the keyword delimiters ('{}' or '{}') or the modifier delimiter ('{}')",
                    param, start, end, modifier
                ),
            ));
        }

        Ok(Self {
            start,
            end,
            modifier,
            param,
            case_sensitive: config.case_sensitive,
        })
    }
}

impl Default for DelimiterSet {
    fn default() -> Self {
        Self {
            start: '{',
            end: '}',
            modifier: '^',
            param: ':',
            case_sensitive: false,
        }
    }
}

impl DelimiterSet {
    pub fn start(&self) -> char {
        self.start
    }

    pub fn end(&self) -> char {
        self.end
    }

    pub fn modifier(&self) -> char {
        self.modifier
    }

    pub fn param(&self) -> char {
        self.param
    }

    pub fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Fold a keyword name the way the keyword table and value lookups expect
    pub fn fold_name(&self, name: &str) -> String {
        if self.case_sensitive {
            name.to_string()
        } else {
            name.to_uppercase()
        }
    }

    /// Regular expression matching one keyword occurrence.
    ///
    /// Group 1 is the keyword name, group 2 (optional) the modifier chain.
    /// A backslash escapes the following character inside both groups.
    pub fn keyword_pattern(&self) -> String {
        let start = escape_char(self.start);
        let end = escape_char(self.end);
        let modifier = escape_char(self.modifier);

        format!(
            r"(?s){start}((?:\\\S|[^\s\\{end}{modifier}])+)(?:{modifier}((?:\\.|[^\\{end}])*))?{end}",
            start = start,
            end = end,
            modifier = modifier,
        )
    }

    /// Undo delimiter escaping: `\` before a delimiter or `%` yields the literal character
    pub fn unescape(&self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\\' {
                if let Some(&next) = chars.peek() {
                    if self.is_escapable(next) {
                        output.push(next);
                        chars.next();
                        continue;
                    }
                }
            }
            output.push(c);
        }

        output
    }

    fn is_escapable(&self, c: char) -> bool {
        c == self.modifier || c == self.param || c == self.end || c == self.start || c == '%'
    }
}

fn escape_char(c: char) -> String {
    regex::escape(c.encode_utf8(&mut [0; 4]))
}

fn mirrored_pair(c: char) -> Option<(char, char)> {
    match c {
        '{' | '}' => Some(('{', '}')),
        '(' | ')' => Some(('(', ')')),
        '[' | ']' => Some(('[', ']')),
        '<' | '>' => Some(('<', '>')),
        _ => None,
    }
}

fn resolve_keyword_pair(value: &str) -> Result<(char, char)> {
    let chars: Vec<char> = value.chars().collect();
    match chars.as_slice() {
        [c] => {
            check_reserved("kwd_delim", *c)?;
            Ok(mirrored_pair(*c).unwrap_or((*c, *c)))
        }
        [start, end] => {
            check_reserved("kwd_delim", *start)?;
            check_reserved("kwd_delim", *end)?;
            Ok((*start, *end))
        }
        _ => Err(TemplateError::configuration(
            "kwd_delim",
            format!(
                "\"{}\" must be a single character or a start/end pair of characters",
                value
            ),
        )),
    }
}

fn single_char(parameter: &'static str, value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            check_reserved(parameter, c)?;
            Ok(c)
        }
        _ => Err(TemplateError::configuration(
            parameter,
            format!("\"{}\" was more than, or less than, one character", value),
        )),
    }
}

fn check_reserved(parameter: &'static str, c: char) -> Result<()> {
    if c.is_alphanumeric() || c.is_whitespace() || c == '_' || c == '-' {
        return Err(TemplateError::configuration(
            parameter,
            format!(
                "'{}' is alphanumeric, white space, an underscore or a hyphen, which are reserved for keyword names",
                c.escape_default()
            ),
        ));
    }
    if c == '\\' {
        return Err(TemplateError::configuration(
            parameter,
            "a backslash is reserved for escaping delimiters",
        ));
    }
    Ok(())
}
