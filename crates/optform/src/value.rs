//! Typed value model and type inference.
//!
//! Raw settings values are plain strings; [`infer`] classifies each one
//! into a [`TypedValue`] by running an ordered cascade of fallible
//! parses. The first parse that succeeds wins, and anything malformed
//! degrades to the nearest less-structured form instead of failing the
//! load.

/// A scalar element inside an unbracketed comma list.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl Scalar {
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Real(f) => format_real(*f),
        }
    }
}

/// Render a real with its decimal point intact, so a whole-valued float
/// re-infers as a real rather than an integer.
pub(crate) fn format_real(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

/// The inferred type of a raw settings value.
///
/// - `ChoiceGroup` comes from `(a, TRUE, b)` values: mutually exclusive
///   labels with exactly one selected.
/// - `Enumeration` comes from `[[a, b, 1]]` values: an item list whose
///   trailing element is the current index.
/// - `ScalarList` comes from any other comma-separated value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Text(String),
    Integer(i64),
    Real(f64),
    Boolean(bool),
    ScalarList(Vec<Scalar>),
    ChoiceGroup { labels: Vec<String>, selected: usize },
    Enumeration { items: Vec<String>, current: usize },
}

impl TypedValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::Boolean(_) => "boolean",
            Self::ScalarList(_) => "list",
            Self::ChoiceGroup { .. } => "choice",
            Self::Enumeration { .. } => "enumeration",
        }
    }

    /// Short user-facing rendering of the current value.
    ///
    /// Structured values show only their active element; the full
    /// serialization lives in the codec.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Integer(n) => n.to_string(),
            Self::Real(f) => format_real(*f),
            Self::Boolean(b) => if *b { "True" } else { "False" }.to_string(),
            Self::ScalarList(items) => items
                .iter()
                .map(Scalar::display)
                .collect::<Vec<_>>()
                .join(", "),
            Self::ChoiceGroup { labels, selected } => {
                labels.get(*selected).cloned().unwrap_or_default()
            }
            Self::Enumeration { items, current } => {
                items.get(*current).cloned().unwrap_or_default()
            }
        }
    }
}

/// Classify a raw string value into a [`TypedValue`].
///
/// Cascade, first match wins:
/// 1. comma-separated: choice group `(...)`, then enumeration `[[...]]`,
///    then scalar list
/// 2. TRUE/FALSE token (case-insensitive) -> boolean
/// 3. all-digit -> integer
/// 4. float parse -> real, else the value stays text
pub fn infer(raw: &str) -> TypedValue {
    if raw.contains(',') {
        let pieces: Vec<String> = raw.split(',').map(|p| p.trim().to_string()).collect();
        if let Some(group) = parse_choice_group(&pieces) {
            return group;
        }
        if let Some(enumeration) = parse_enumeration(&pieces) {
            return enumeration;
        }
        return infer_scalar_list(pieces);
    }

    if raw.eq_ignore_ascii_case("TRUE") {
        return TypedValue::Boolean(true);
    }
    if raw.eq_ignore_ascii_case("FALSE") {
        return TypedValue::Boolean(false);
    }

    if is_all_digits(raw) {
        if let Ok(n) = raw.parse::<i64>() {
            return TypedValue::Integer(n);
        }
        // Digit string too large for i64 falls through to the float path.
    }

    match raw.parse::<f64>() {
        Ok(f) => TypedValue::Real(f),
        Err(_) => TypedValue::Text(raw.to_string()),
    }
}

/// Unsigned, undecorated digits only. Signs and decimal points route
/// through the float path.
fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse `(a, TRUE, b)` pieces into a choice group.
///
/// The selected index is the TRUE marker's position in the full element
/// list minus one -- the file format convention is that TRUE directly
/// follows the selected label. A marker in first position saturates to
/// index 0, several markers keep the last one, and the result is
/// clamped to the label count. No marker selects the first label.
fn parse_choice_group(pieces: &[String]) -> Option<TypedValue> {
    let first = pieces.first()?;
    let last = pieces.last()?;
    if !first.starts_with('(') || !last.ends_with(')') {
        return None;
    }

    let mut elements = pieces.to_vec();
    if let Some(f) = elements.first_mut() {
        *f = f.trim_start_matches('(').to_string();
    }
    if let Some(l) = elements.last_mut() {
        *l = l.trim_end_matches(')').to_string();
    }

    let mut labels = Vec::new();
    let mut selected = 0usize;
    for (pos, element) in elements.iter().enumerate() {
        if element.eq_ignore_ascii_case("TRUE") {
            selected = pos.saturating_sub(1);
        } else {
            labels.push(element.clone());
        }
    }

    if labels.is_empty() {
        return None;
    }
    let selected = selected.min(labels.len() - 1);
    Some(TypedValue::ChoiceGroup { labels, selected })
}

/// Parse `[[a, b, 1]]` pieces into an enumeration.
///
/// The last element must be an in-range all-digit index; anything else
/// falls through so the value degrades to a scalar list with the
/// markers left in place.
fn parse_enumeration(pieces: &[String]) -> Option<TypedValue> {
    let first = pieces.first()?;
    let last = pieces.last()?;
    if !first.starts_with("[[") || !last.ends_with("]]") || pieces.len() < 2 {
        return None;
    }

    let mut elements = pieces.to_vec();
    if let Some(f) = elements.first_mut() {
        *f = f.trim_start_matches('[').to_string();
    }
    if let Some(l) = elements.last_mut() {
        *l = l.trim_end_matches(']').to_string();
    }

    let index_text = elements.last()?;
    if !is_all_digits(index_text) {
        return None;
    }
    let current: usize = index_text.parse().ok()?;

    let items = elements[..elements.len() - 1].to_vec();
    if current >= items.len() {
        return None;
    }
    Some(TypedValue::Enumeration { items, current })
}

/// Comma list without markers: all-or-nothing numeric promotion.
///
/// Every piece must parse (all-digit integer, else float) or the whole
/// list stays textual, mirroring the source format's list semantics.
fn infer_scalar_list(pieces: Vec<String>) -> TypedValue {
    let mut scalars = Vec::with_capacity(pieces.len());
    for piece in &pieces {
        match parse_numeric(piece) {
            Some(scalar) => scalars.push(scalar),
            None => {
                return TypedValue::ScalarList(pieces.into_iter().map(Scalar::Text).collect());
            }
        }
    }
    TypedValue::ScalarList(scalars)
}

fn parse_numeric(piece: &str) -> Option<Scalar> {
    if is_all_digits(piece) {
        if let Ok(n) = piece.parse::<i64>() {
            return Some(Scalar::Integer(n));
        }
    }
    piece.parse::<f64>().ok().map(Scalar::Real)
}
