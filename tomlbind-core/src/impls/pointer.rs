use alloc::boxed::Box;

use crate::{Bind, Def, Poke, PokeOption, Shape};

impl<T: Bind> Bind for Option<T> {
    const SHAPE: &'static Shape = &Shape::new("Option", Def::Option);

    fn zero() -> Self {
        None
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Option(self)
    }
}

impl<T: Bind> PokeOption for Option<T> {
    fn shape(&self) -> &'static Shape {
        <Self as Bind>::SHAPE
    }

    fn is_some(&self) -> bool {
        Option::is_some(self)
    }

    fn allocate(&mut self) -> Poke<'_> {
        self.insert(T::zero()).poke()
    }
}

// A box is not a nullable indirection: it always has a pointee, so it binds
// exactly like the value it owns.
impl<T: Bind> Bind for Box<T> {
    const SHAPE: &'static Shape = T::SHAPE;

    fn zero() -> Self {
        Box::new(T::zero())
    }

    fn poke(&mut self) -> Poke<'_> {
        (**self).poke()
    }
}
