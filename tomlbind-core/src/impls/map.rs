use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::ToString;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;
use std::collections::hash_map;

use indexmap::IndexMap;

use crate::{Bind, BindKey, Def, Poke, PokeMap, ReflectError, Shape};

fn convert_key<K: BindKey>(key: &str) -> Result<K, ReflectError> {
    K::from_key(key).map_err(|reason| ReflectError::UnconvertibleKey {
        key: key.to_string(),
        target: K::KEY_TYPE,
        reason,
    })
}

impl<K, V, S> Bind for HashMap<K, V, S>
where
    K: BindKey + Eq + Hash,
    V: Bind,
    S: BuildHasher + Default + 'static,
{
    const SHAPE: &'static Shape = &Shape::new("HashMap", Def::Map);

    fn zero() -> Self {
        HashMap::default()
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Map(self)
    }
}

impl<K, V, S> PokeMap for HashMap<K, V, S>
where
    K: BindKey + Eq + Hash,
    V: Bind,
    S: BuildHasher + Default + 'static,
{
    fn shape(&self) -> &'static Shape {
        <Self as Bind>::SHAPE
    }

    fn len(&self) -> usize {
        HashMap::len(self)
    }

    fn fresh_entry(&mut self, key: &str) -> Result<Poke<'_>, ReflectError> {
        let slot = match self.entry(convert_key::<K>(key)?) {
            hash_map::Entry::Occupied(entry) => {
                let slot = entry.into_mut();
                *slot = V::zero();
                slot
            }
            hash_map::Entry::Vacant(entry) => entry.insert(V::zero()),
        };
        Ok(slot.poke())
    }
}

impl<K, V> Bind for BTreeMap<K, V>
where
    K: BindKey + Ord,
    V: Bind,
{
    const SHAPE: &'static Shape = &Shape::new("BTreeMap", Def::Map);

    fn zero() -> Self {
        BTreeMap::new()
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Map(self)
    }
}

impl<K, V> PokeMap for BTreeMap<K, V>
where
    K: BindKey + Ord,
    V: Bind,
{
    fn shape(&self) -> &'static Shape {
        <Self as Bind>::SHAPE
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }

    fn fresh_entry(&mut self, key: &str) -> Result<Poke<'_>, ReflectError> {
        let slot = match self.entry(convert_key::<K>(key)?) {
            btree_map::Entry::Occupied(entry) => {
                let slot = entry.into_mut();
                *slot = V::zero();
                slot
            }
            btree_map::Entry::Vacant(entry) => entry.insert(V::zero()),
        };
        Ok(slot.poke())
    }
}

impl<K, V, S> Bind for IndexMap<K, V, S>
where
    K: BindKey + Eq + Hash,
    V: Bind,
    S: BuildHasher + Default + 'static,
{
    const SHAPE: &'static Shape = &Shape::new("IndexMap", Def::Map);

    fn zero() -> Self {
        IndexMap::default()
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Map(self)
    }
}

impl<K, V, S> PokeMap for IndexMap<K, V, S>
where
    K: BindKey + Eq + Hash,
    V: Bind,
    S: BuildHasher + Default + 'static,
{
    fn shape(&self) -> &'static Shape {
        <Self as Bind>::SHAPE
    }

    fn len(&self) -> usize {
        IndexMap::len(self)
    }

    fn fresh_entry(&mut self, key: &str) -> Result<Poke<'_>, ReflectError> {
        let slot = match self.entry(convert_key::<K>(key)?) {
            indexmap::map::Entry::Occupied(entry) => {
                let slot = entry.into_mut();
                *slot = V::zero();
                slot
            }
            indexmap::map::Entry::Vacant(entry) => entry.insert(V::zero()),
        };
        Ok(slot.poke())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entry_keeps_other_keys() {
        let mut map: HashMap<String, i64> = HashMap::new();
        map.insert("a".into(), 9999);
        map.insert("c".into(), 3);

        assert!(PokeMap::fresh_entry(&mut map, "a").is_ok());
        assert!(PokeMap::fresh_entry(&mut map, "b").is_ok());

        assert_eq!(map.len(), 3);
        assert_eq!(map["a"], 0);
        assert_eq!(map["b"], 0);
        assert_eq!(map["c"], 3);
    }

    #[test]
    fn fresh_entry_converts_keys() {
        let mut map: BTreeMap<u16, bool> = BTreeMap::new();
        assert!(PokeMap::fresh_entry(&mut map, "80").is_ok());
        assert!(map.contains_key(&80));

        let err = PokeMap::fresh_entry(&mut map, "http").unwrap_err();
        match err {
            ReflectError::UnconvertibleKey { key, target, .. } => {
                assert_eq!(key, "http");
                assert_eq!(target, "u16");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(map.len(), 1);
    }
}
