use std::rc::Rc;

use crate::marshal::Value;

/// Symbols in order of first occurrence within one session.
///
/// Names are kept as raw bytes; Ruby writes symbols in any encoding.
#[derive(Debug, Default)]
pub struct SymbolTable {
	entries: Vec<Rc<[u8]>>,
}

impl SymbolTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a first-occurrence symbol and return its index.
	pub fn push(&mut self, name: Rc<[u8]>) -> usize {
		self.entries.push(name);
		self.entries.len() - 1
	}

	/// Resolve a link index; negative or forward indices yield `None`.
	pub fn get(&self, index: i64) -> Option<&Rc<[u8]>> {
		usize::try_from(index).ok().and_then(|index| self.entries.get(index))
	}

	/// Index of an already-recorded symbol.
	pub fn index_of(&self, name: &[u8]) -> Option<usize> {
		self.entries.iter().position(|entry| entry.as_ref() == name)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
		self.entries.iter().map(|entry| entry.as_ref())
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}
}

/// Composite values addressable by object links within one session.
///
/// Slots are reserved when a value starts and filled once it is complete, so
/// numbering matches the order in which values begin in the stream.
#[derive(Debug, Default)]
pub struct ObjectTable {
	entries: Vec<Option<Value>>,
}

impl ObjectTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Reserve the next slot for a value still being decoded.
	pub fn reserve(&mut self) -> usize {
		self.entries.push(None);
		self.entries.len() - 1
	}

	/// Store the finished value for a reserved slot.
	pub fn fill(&mut self, slot: usize, value: Value) {
		if let Some(entry) = self.entries.get_mut(slot) {
			*entry = Some(value);
		}
	}

	/// Reserve and fill in one step.
	pub fn push(&mut self, value: Value) -> usize {
		self.entries.push(Some(value));
		self.entries.len() - 1
	}

	/// Resolve a link index to a finished value.
	pub fn get(&self, index: i64) -> Option<&Value> {
		usize::try_from(index).ok().and_then(|index| self.entries.get(index)).and_then(Option::as_ref)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}
}
