//! Recursive-descent parser for dotted-path assignments.

use serde_json::{Map, Value};

use super::error::{AssignmentError, ValueShape};
use super::scanner::Scanner;
use super::{MAX_INDEX, MAX_NESTED_NAME_LEVEL, typed_value};

/// Callback resolving a `--set-file` right-hand side to a value.
pub(super) type FileReader<'a> = dyn FnMut(&str) -> Result<Value, AssignmentError> + 'a;

/// How right-hand sides are turned into values.
pub(super) enum ValueMode<'a> {
    /// Infer booleans, null and integers.
    Typed,
    /// Keep every value as a string.
    Text,
    /// Decode one JSON document per assignment.
    Json,
    /// Replace the value with whatever the reader returns for it.
    File(&'a mut FileReader<'a>),
    /// Everything after `=` is one string; no escapes, no commas.
    Literal,
}

/// Whether the expression has more assignments to process.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Flow {
    More,
    End,
}

pub(super) struct Parser<'a> {
    scanner: Scanner,
    mode: ValueMode<'a>,
}

impl<'a> Parser<'a> {
    pub(super) fn new(input: &str, mode: ValueMode<'a>) -> Self {
        let scanner = match mode {
            ValueMode::Literal => Scanner::literal(input),
            _ => Scanner::new(input),
        };
        Self { scanner, mode }
    }

    /// Apply every assignment in the input to `data`.
    pub(super) fn parse(mut self, data: &mut Map<String, Value>) -> Result<(), AssignmentError> {
        while self.key(data, 0)? == Flow::More {}
        Ok(())
    }

    const fn is_literal(&self) -> bool {
        matches!(self.mode, ValueMode::Literal)
    }

    fn key(&mut self, data: &mut Map<String, Value>, level: usize) -> Result<Flow, AssignmentError> {
        let stop: &[char] = if self.is_literal() {
            &['=', '[', '.']
        } else {
            &['=', '[', ',', '.']
        };
        let token = self.scanner.until(stop);
        let key = token.text;
        match token.stop {
            None if key.is_empty() => Ok(Flow::End),
            None => Err(AssignmentError::NoValue { key }),
            Some('=') => {
                let (value, flow) = self.value()?;
                set(data, key, value);
                Ok(flow)
            }
            Some(',') => Err(AssignmentError::TrailingComma { key }),
            Some('.') => self.nested_key(data, key, descend(level)?),
            Some('[') => {
                let level = descend(level)?;
                let index = self.key_index()?;
                let existing = data.get_mut(&key).map(std::mem::take);
                let existed = existing.is_some();
                let mut list = match existing {
                    None => Vec::new(),
                    Some(Value::Array(items)) => items,
                    Some(other) => {
                        return Err(AssignmentError::conflict(key, ValueShape::Sequence, &other));
                    }
                };
                let flow = self.list_item(&mut list, index, level)?;
                store(data, key, Value::Array(list), existed);
                Ok(flow)
            }
            Some(other) => Err(unexpected(other)),
        }
    }

    /// Descend through `key` into a nested document.
    fn nested_key(
        &mut self,
        data: &mut Map<String, Value>,
        key: String,
        level: usize,
    ) -> Result<Flow, AssignmentError> {
        let existing = data.get_mut(&key).map(std::mem::take);
        let existed = existing.is_some();
        let mut inner = match existing {
            None => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(AssignmentError::conflict(key, ValueShape::Document, &other));
            }
        };
        let flow = self.key(&mut inner, level)?;
        if flow == Flow::More && inner.is_empty() {
            return Err(AssignmentError::EmptyKeyMap { key });
        }
        if existed || !inner.is_empty() {
            store(data, key, Value::Object(inner), existed);
        }
        Ok(flow)
    }

    /// Read the index between `[` and `]`.
    fn key_index(&mut self) -> Result<usize, AssignmentError> {
        let token = self.scanner.until(&[']']);
        if token.stop.is_none() {
            return Err(AssignmentError::UnclosedIndex);
        }
        let index = token
            .text
            .parse::<i64>()
            .map_err(|source| AssignmentError::InvalidIndex {
                raw: token.text.clone(),
                source,
            })?;
        if index < 0 {
            return Err(AssignmentError::NegativeIndex { index });
        }
        usize::try_from(index)
            .ok()
            .filter(|checked| *checked <= MAX_INDEX)
            .ok_or(AssignmentError::IndexTooLarge { index })
    }

    /// Handle whatever follows `[index]`.
    fn list_item(
        &mut self,
        list: &mut Vec<Value>,
        index: usize,
        level: usize,
    ) -> Result<Flow, AssignmentError> {
        let token = self.scanner.until(&['[', '.', '=']);
        if !token.text.is_empty() {
            return Err(AssignmentError::UnexpectedIndexData { data: token.text });
        }
        match token.stop {
            None => Err(AssignmentError::MissingIndexValue),
            Some('=') => {
                let (value, flow) = self.value()?;
                set_index(list, index, value);
                Ok(flow)
            }
            Some('[') => {
                let next = self.key_index()?;
                let mut inner = match list.get_mut(index).map(std::mem::take) {
                    None | Some(Value::Null) => Vec::new(),
                    Some(Value::Array(items)) => items,
                    Some(other) => {
                        return Err(AssignmentError::conflict(
                            index.to_string(),
                            ValueShape::Sequence,
                            &other,
                        ));
                    }
                };
                let flow = self.list_item(&mut inner, next, descend(level)?)?;
                set_index(list, index, Value::Array(inner));
                Ok(flow)
            }
            Some('.') => {
                // Out-of-order indices leave placeholders that are overwritten here.
                let mut inner = match list.get_mut(index).map(std::mem::take) {
                    Some(Value::Object(map)) => map,
                    _ => Map::new(),
                };
                let flow = self.key(&mut inner, level)?;
                set_index(list, index, Value::Object(inner));
                Ok(flow)
            }
            Some(other) => Err(unexpected(other)),
        }
    }

    /// Read the right-hand side of an assignment.
    fn value(&mut self) -> Result<(Value, Flow), AssignmentError> {
        match self.mode {
            ValueMode::Literal => Ok((Value::String(self.scanner.rest()), Flow::More)),
            ValueMode::Json => {
                if self.scanner.skip_empty() {
                    return Ok((Value::Null, Flow::More));
                }
                let value = self.json_value()?;
                self.scanner.skip_empty();
                Ok((value, Flow::More))
            }
            ValueMode::Typed | ValueMode::Text | ValueMode::File(_) => match self.value_list()? {
                ListValue::Items(items) => Ok((Value::Array(items), Flow::More)),
                ListValue::Empty => Ok((Value::String(String::new()), Flow::End)),
                ListValue::NotList => {
                    let token = self.scanner.until(&[',']);
                    Ok((self.convert(&token.text)?, Flow::More))
                }
            },
        }
    }

    /// Decode exactly one JSON document from the remaining input.
    fn json_value(&mut self) -> Result<Value, AssignmentError> {
        let rest = self.scanner.remaining();
        let mut stream = serde_json::Deserializer::from_str(&rest).into_iter::<Value>();
        let value = stream
            .next()
            .ok_or(AssignmentError::MissingJsonValue)?
            .map_err(|source| AssignmentError::Json { source })?;
        let consumed = rest
            .get(..stream.byte_offset())
            .map_or(0, |decoded| decoded.chars().count());
        self.scanner.skip(consumed);
        Ok(value)
    }

    /// Parse a `{a,b,c}` list if one starts here.
    fn value_list(&mut self) -> Result<ListValue, AssignmentError> {
        match self.scanner.next_char() {
            None => return Ok(ListValue::Empty),
            Some('{') => {}
            Some(_) => {
                self.scanner.unread();
                return Ok(ListValue::NotList);
            }
        }
        let mut items = Vec::new();
        loop {
            let token = self.scanner.until(&[',', '}']);
            match token.stop {
                None => return Err(AssignmentError::UnterminatedList),
                Some('}') => {
                    if let Some(next) = self.scanner.next_char()
                        && next != ','
                    {
                        self.scanner.unread();
                    }
                    items.push(self.convert(&token.text)?);
                    return Ok(ListValue::Items(items));
                }
                Some(_) => items.push(self.convert(&token.text)?),
            }
        }
    }

    fn convert(&mut self, raw: &str) -> Result<Value, AssignmentError> {
        match &mut self.mode {
            ValueMode::Typed | ValueMode::Json => Ok(typed_value(raw)),
            ValueMode::Text | ValueMode::Literal => Ok(Value::String(raw.to_owned())),
            ValueMode::File(reader) => (*reader)(raw),
        }
    }
}

enum ListValue {
    Items(Vec<Value>),
    Empty,
    NotList,
}

const fn descend(level: usize) -> Result<usize, AssignmentError> {
    let next = level + 1;
    if next > MAX_NESTED_NAME_LEVEL {
        return Err(AssignmentError::TooDeep);
    }
    Ok(next)
}

const fn unexpected(token: char) -> AssignmentError {
    AssignmentError::UnexpectedToken { token }
}

/// Store `value` under `key`; empty keys are never stored.
fn set(data: &mut Map<String, Value>, key: String, value: Value) {
    if !key.is_empty() {
        data.insert(key, value);
    }
}

/// Put a value taken out of `data` back, or store a new one.
fn store(data: &mut Map<String, Value>, key: String, value: Value, existed: bool) {
    if existed {
        data.insert(key, value);
    } else {
        set(data, key, value);
    }
}

/// Write `value` at `index`, padding the list with nulls as needed.
fn set_index(list: &mut Vec<Value>, index: usize, value: Value) {
    if let Some(slot) = list.get_mut(index) {
        *slot = value;
    } else {
        list.resize(index, Value::Null);
        list.push(value);
    }
}
