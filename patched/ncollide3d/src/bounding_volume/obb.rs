use math::{Vector, Isometry};


#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OBB {
    position: Isometry<N>,
    half_extents: Vector<N>
}


impl<N: RealField> BoundingVolume<N> for AABB<N> {
    #[inline]
    fn center(&self) -> Point<N> {
        self.center()
    }

    #[inline]
    fn intersects(&self, other: &AABB<N>) -> bool {
        unimplemented!()
    }

    #[inline]
    fn contains(&self, other: &AABB<N>) -> bool {
        unimplemented!()
    }

    #[inline]
    fn merge(&mut self, other: &AABB<N>) {
        unimplemented!()
    }

    #[inline]
    fn merged(&self, other: &AABB<N>) -> AABB<N> {
        unimplemented!()
    }

    #[inline]
    fn loosen(&mut self, amount: N) {
        assert!(
            amount >= na::zero(),
            "The loosening margin must be positive."
        );
        unimplemented!()
    }

    #[inline]
    fn loosened(&self, amount: N) -> AABB<N> {
        assert!(
            amount >= na::zero(),
            "The loosening margin must be positive."
        );
        unimplemented!()
    }

    #[inline]
    fn tighten(&mut self, amount: N) {
        assert!(
            amount >= na::zero(),
            "The tightening margin must be positive."
        );
        unimplemented!()
    }

    #[inline]
    fn tightened(&self, amount: N) -> AABB<N> {
        assert!(
            amount >= na::zero(),
            "The tightening margin must be positive."
        );
        unimplemented!()
    }
}