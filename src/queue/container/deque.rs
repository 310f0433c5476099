//! Capabilities for the growable `VecDeque`, the default queue container

use super::{
    FromSize, SupportsEmplaceBack, SupportsEmpty, SupportsPopFront, SupportsPushBack,
    SupportsSize, SupportsVisit,
};
use std::collections::VecDeque;

impl<T> SupportsPushBack<T> for VecDeque<T> {
    fn push_back(&mut self, value: T) {
        VecDeque::push_back(self, value);
    }
}

impl<T> SupportsEmplaceBack<T> for VecDeque<T> {
    fn emplace_back_with<F>(&mut self, make: F)
    where
        F: FnOnce() -> T,
    {
        VecDeque::push_back(self, make());
    }
}

impl<T> SupportsPopFront<T> for VecDeque<T> {
    fn front(&self) -> Option<&T> {
        VecDeque::front(self)
    }

    fn pop_front(&mut self) -> Option<T> {
        VecDeque::pop_front(self)
    }
}

impl<T> SupportsEmpty for VecDeque<T> {
    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }
}

impl<T> SupportsSize for VecDeque<T> {
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
}

impl<T> SupportsVisit<T> for VecDeque<T> {
    fn visit<F>(&self, visitor: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(visitor);
    }
}

/// `size` default-valued elements
impl<T: Default> FromSize for VecDeque<T> {
    fn from_size(size: usize) -> Self {
        std::iter::repeat_with(T::default).take(size).collect()
    }
}
