// Copyright (C) 2024 Parity Technologies (UK) Ltd. (admin@parity.io)
// This file is a part of the scale-object crate.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//         http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! This module provides a [`TypeRegistrySet`], which is constructed from a selection of
//! [`crate::TypeRegistry`]'s, and will resolve types by looking through each one in a known order
//! until a match is found. This allows us to layer different sets of types on top of each other,
//! for instance some custom types on top of [`crate::TypeRegistry::basic()`].

use crate::error::{Error, ErrorKind};
use crate::type_def::TypeDef;
use crate::type_registry::{TypeLookup, TypeRegistry};
use alloc::borrow::Cow;
use alloc::collections::VecDeque;
use alloc::string::ToString;

/// This can be constructed from an iterator of [`crate::TypeRegistry`]s. When looking up
/// types, it will treat the provided registries as a stack, looking in the last provided
/// registry first and then working back through them until it can find the type.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistrySet<'a> {
    registries: VecDeque<Cow<'a, TypeRegistry>>,
}

impl<'a> TypeRegistrySet<'a> {
    /// Take ownership of this [`TypeRegistrySet`]. If the underlying type registries are
    /// borrowed, then they are cloned in order to take ownership of them.
    pub fn to_owned(self) -> TypeRegistrySet<'static> {
        let registries = self.registries.into_iter().map(|r| Cow::Owned(r.into_owned())).collect();
        TypeRegistrySet { registries }
    }

    /// Add some types to the beginning of the set of registries. These types will be
    /// checked after all of the others.
    pub fn prepend(&mut self, types: impl Into<Cow<'a, TypeRegistry>>) {
        self.registries.push_front(types.into());
    }

    /// Add some types to the end of the set of registries. These types will be
    /// checked before all of the others.
    pub fn append(&mut self, types: impl Into<Cow<'a, TypeRegistry>>) {
        self.registries.push_back(types.into());
    }

    /// Look up a type definition by name, working through the inner type registries from
    /// latest to earliest until a match is found.
    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.registries.iter().rev().find_map(|registry| registry.get(name))
    }

    /// Look up a type definition by name, returning an error if no registry contains it.
    pub fn resolve(&self, name: &str) -> Result<&TypeDef, Error> {
        self.get(name).ok_or_else(|| Error::new(ErrorKind::UnknownType(name.to_string())))
    }

    /// The number of registries in this set.
    pub fn len(&self) -> usize {
        self.registries.len()
    }

    /// Are there no registries in this set?
    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}

impl<'a, R: Into<Cow<'a, TypeRegistry>>> core::iter::FromIterator<R> for TypeRegistrySet<'a> {
    fn from_iter<T: IntoIterator<Item = R>>(iter: T) -> Self {
        TypeRegistrySet { registries: iter.into_iter().map(Into::into).collect() }
    }
}

impl<'a> TypeLookup for TypeRegistrySet<'a> {
    fn lookup(&self, name: &str) -> Option<&TypeDef> {
        self.get(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::Codec;
    use crate::cursor::ByteCursor;
    use crate::type_expr::{Primitive, TypeExpr};
    use crate::value::ScaleValue;

    fn n(name: &str) -> TypeExpr {
        TypeExpr::named(name)
    }

    fn registry(defs: impl IntoIterator<Item = (&'static str, TypeDef)>) -> TypeRegistry {
        let mut types = TypeRegistry::empty();
        types.register(defs).unwrap();
        types
    }

    #[test]
    fn picks_last_registry_first() {
        let a = registry([
            ("u8", TypeDef::Primitive(Primitive::U8)),
            ("Val", TypeDef::Primitive(Primitive::I8)),
        ]);
        let b = registry([("Val", TypeDef::Primitive(Primitive::I16))]);

        // Lookups will look in b, then a.
        let types = TypeRegistrySet::from_iter([a, b]);

        assert_eq!(types.get("u8"), Some(&TypeDef::Primitive(Primitive::U8)));
        assert_eq!(types.get("Val"), Some(&TypeDef::Primitive(Primitive::I16)));
        assert!(types.resolve("Nope").is_err());
    }

    #[test]
    fn prepended_registries_are_checked_last() {
        let basic = TypeRegistry::basic();
        let custom = registry([("u8", TypeDef::Primitive(Primitive::U16))]);

        let mut types = TypeRegistrySet::from_iter([&custom]);
        types.prepend(&basic);
        assert_eq!(types.len(), 2);
        assert_eq!(types.get("u8"), Some(&TypeDef::Primitive(Primitive::U16)));
        assert_eq!(types.get("bool"), Some(&TypeDef::Primitive(Primitive::Bool)));

        let types = types.to_owned();
        assert_eq!(types.get("u8"), Some(&TypeDef::Primitive(Primitive::U16)));
    }

    #[test]
    fn resolve_alias_backwards_across_registries() {
        let a = registry([("A", TypeDef::alias_of(n("B")))]);
        let b = registry([("B", TypeDef::alias_of(n("C")))]);
        let c = registry([("C", TypeDef::Primitive(Primitive::Bool))]);

        // Lookups will look in c, then b, then a.
        let types = TypeRegistrySet::from_iter([a, b, c]);

        // Decoding the alias A needs to backtrack to earlier registries to resolve.
        let mut input = ByteCursor::new(&[1]);
        let value = Codec::new(&types).decode(&n("A"), &mut input).unwrap();
        assert_eq!(value, ScaleValue::Bool(true));
    }
}
