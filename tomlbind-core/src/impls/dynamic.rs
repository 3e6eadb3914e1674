use crate::{Bind, Def, Poke, Shape, Value};

impl Bind for Value {
    const SHAPE: &'static Shape = &Shape::new("Value", Def::Dynamic);

    fn zero() -> Self {
        Value::default()
    }

    fn poke(&mut self) -> Poke<'_> {
        Poke::Dynamic(self)
    }
}
