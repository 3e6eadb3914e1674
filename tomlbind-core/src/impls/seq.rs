use alloc::vec::Vec;

use crate::{Bind, Def, Poke, PokeArray, PokeList, Shape};

impl<T: Bind> Bind for Vec<T> {
    const SHAPE: &'static Shape = &Shape::new("Vec", Def::List);

    fn zero() -> Self {
        Vec::new()
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::List(self)
    }
}

impl<T: Bind> PokeList for Vec<T> {
    fn shape(&self) -> &'static Shape {
        <Self as Bind>::SHAPE
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn clear(&mut self) {
        Vec::clear(self)
    }

    fn push_fresh(&mut self) -> Poke<'_> {
        let index = Vec::len(self);
        self.push(T::zero());
        self[index].poke()
    }
}

impl<T: Bind, const N: usize> Bind for [T; N] {
    const SHAPE: &'static Shape = &Shape::new("array", Def::Array { n: N });

    fn zero() -> Self {
        core::array::from_fn(|_| T::zero())
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Array(self)
    }
}

impl<T: Bind, const N: usize> PokeArray for [T; N] {
    fn shape(&self) -> &'static Shape {
        <Self as Bind>::SHAPE
    }

    fn len(&self) -> usize {
        N
    }

    fn fresh_element(&mut self, index: usize) -> Option<Poke<'_>> {
        let slot = self.get_mut(index)?;
        *slot = T::zero();
        Some(slot.poke())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PokeScalar;

    #[test]
    fn push_fresh_appends_zero() {
        let mut v: Vec<u32> = alloc::vec![7];
        match PokeList::push_fresh(&mut v) {
            Poke::Scalar(s) => assert!(s.is_zero()),
            other => panic!("expected scalar, got {other:?}"),
        }
        assert_eq!(v, [7, 0]);
        PokeList::clear(&mut v);
        assert!(v.is_empty());
    }

    #[test]
    fn array_elements_reset() {
        let mut a = [1u8, 2, 3];
        assert!(PokeArray::fresh_element(&mut a, 1).is_some());
        assert!(PokeArray::fresh_element(&mut a, 3).is_none());
        assert_eq!(a, [1, 0, 3]);
    }
}
