use alloc::string::String;

#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

#[cfg(feature = "std")]
pub(crate) type KeyIndexMap = HashMap<String, usize>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyIndexMap = BTreeMap<String, usize>;

#[cfg(feature = "std")]
pub(crate) type KeyMap<V> = HashMap<String, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<V> = BTreeMap<String, V>;

#[cfg(feature = "std")]
pub(crate) type KeySet<'a> = HashSet<&'a str>;
#[cfg(not(feature = "std"))]
pub(crate) type KeySet<'a> = BTreeSet<&'a str>;
