use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use log::debug;

use crate::error::ResolveError;

use super::attribute::AttributeDecl;
use super::builtins;
use super::group::{GroupChild, XsdElement, XsdGroup};
use super::qname::QName;
use super::schema::XsdSchema;
use super::types::{ComplexType, ContentModel, SimpleType, TypeRef, XsdType};

/// Link a freshly loaded schema so the converter can treat it as resolved.
///
/// Names every global from its key, checks that every type, group and
/// element reference has a target, materializes referenced built-in types,
/// and fills in each atomic simple type's nearest built-in ancestor.
pub fn link(mut schema: XsdSchema) -> Result<XsdSchema, ResolveError> {
    for (qname, ty) in schema.types.iter_mut() {
        if ty.name().is_none() {
            ty.set_name(qname.clone());
        }
    }
    for (qname, group) in schema.groups.iter_mut() {
        group.name.get_or_insert_with(|| qname.clone());
    }
    for (qname, element) in schema.elements.iter_mut() {
        if element.reference.is_none() {
            element.name.get_or_insert_with(|| qname.clone());
        }
    }

    let mut linker = Linker {
        types: schema.types.keys().cloned().collect(),
        groups: schema.groups.keys().cloned().collect(),
        elements: schema.elements.keys().cloned().collect(),
        primitives: global_primitives(&schema.types)?,
        builtins: IndexMap::new(),
    };

    for (qname, ty) in schema.types.iter_mut() {
        linker.link_type(ty, qname)?;
    }
    for (qname, group) in schema.groups.iter_mut() {
        linker.link_group(group, qname)?;
    }
    for (qname, element) in schema.elements.iter_mut() {
        linker.link_element(element, qname)?;
    }

    debug!(
        "linked {} types, {} groups, {} elements ({} built-ins referenced)",
        schema.types.len(),
        schema.groups.len(),
        schema.elements.len(),
        linker.builtins.len()
    );
    schema.builtins = linker.builtins;
    Ok(schema)
}

struct Linker {
    types: HashSet<QName>,
    groups: HashSet<QName>,
    elements: HashSet<QName>,
    primitives: HashMap<QName, Option<QName>>,
    builtins: IndexMap<QName, XsdType>,
}

impl Linker {
    fn link_type(&mut self, ty: &mut XsdType, owner: &QName) -> Result<(), ResolveError> {
        match ty {
            XsdType::Simple(simple) => self.link_simple(simple, owner),
            XsdType::Union(union) => {
                for member in union.member_types.iter_mut().flatten() {
                    self.link_type_ref(member, owner)?;
                }
                Ok(())
            }
            XsdType::Complex(complex) => self.link_complex(complex, owner),
        }
    }

    fn link_simple(&mut self, simple: &mut SimpleType, owner: &QName) -> Result<(), ResolveError> {
        if let Some(base) = simple.base.as_mut() {
            self.link_type_ref(base, owner)?;
        }
        if simple.primitive.is_none() {
            simple.primitive = self.primitive_of_base(simple.base.as_ref());
        }
        Ok(())
    }

    fn link_complex(&mut self, complex: &mut ComplexType, owner: &QName) -> Result<(), ResolveError> {
        if let Some(derivation) = complex.derivation.as_mut() {
            self.link_type_ref(&mut derivation.base, owner)?;
        }
        for decl in &mut complex.attributes {
            if let AttributeDecl::Attribute(attribute) = decl {
                self.link_type_ref(&mut attribute.type_ref, owner)?;
            }
        }
        match complex.content.as_mut() {
            Some(ContentModel::Group(group)) => self.link_group(group, owner),
            Some(ContentModel::Simple(type_ref)) => self.link_type_ref(type_ref, owner),
            None => Ok(()),
        }
    }

    fn link_group(&mut self, group: &mut XsdGroup, owner: &QName) -> Result<(), ResolveError> {
        if let Some(reference) = &group.reference {
            if !self.groups.contains(reference) {
                return Err(ResolveError::UnresolvedGroup(reference.to_string()));
            }
        }
        for child in &mut group.children {
            match child {
                GroupChild::Element(element) => self.link_element(element, owner)?,
                GroupChild::Group(nested) => self.link_group(nested, owner)?,
                GroupChild::Any(_) => {}
            }
        }
        Ok(())
    }

    fn link_element(&mut self, element: &mut XsdElement, owner: &QName) -> Result<(), ResolveError> {
        match (&element.reference, &element.name) {
            (Some(reference), _) if !self.elements.contains(reference) => {
                Err(ResolveError::UnresolvedElement(reference.to_string()))
            }
            (Some(_), _) => Ok(()),
            (None, None) => Err(ResolveError::MissingName(owner.to_string())),
            (None, Some(_)) => self.link_type_ref(&mut element.type_ref, owner),
        }
    }

    fn link_type_ref(&mut self, type_ref: &mut TypeRef, owner: &QName) -> Result<(), ResolveError> {
        match type_ref {
            TypeRef::Named(name) => self.require_type(name),
            TypeRef::Inline(ty) => self.link_type(ty, owner),
        }
    }

    fn require_type(&mut self, name: &QName) -> Result<(), ResolveError> {
        if self.types.contains(name) || self.builtins.contains_key(name) {
            return Ok(());
        }
        let builtin = builtins::builtin_type(name)
            .ok_or_else(|| ResolveError::UnresolvedType(name.to_string()))?;
        self.builtins.insert(name.clone(), builtin);
        Ok(())
    }

    /// Primitive inherited through `base`. Inline bases are linked first, so
    /// their own primitive is already known.
    fn primitive_of_base(&self, base: Option<&TypeRef>) -> Option<QName> {
        match base? {
            TypeRef::Named(name) if builtins::is_builtin(name) => builtins::builtin_primitive(name),
            TypeRef::Named(name) => self.primitives.get(name).cloned().flatten(),
            TypeRef::Inline(ty) => match ty.as_ref() {
                XsdType::Simple(simple) => simple.primitive.clone(),
                _ => None,
            },
        }
    }
}

/// Nearest built-in ancestor of every global simple type, walking named
/// base chains.
fn global_primitives(
    types: &IndexMap<QName, XsdType>,
) -> Result<HashMap<QName, Option<QName>>, ResolveError> {
    let mut resolved = HashMap::new();
    for qname in types.keys() {
        let mut chain = Vec::new();
        primitive_of_named(qname, types, &mut resolved, &mut chain)?;
    }
    Ok(resolved)
}

fn primitive_of_named(
    name: &QName,
    types: &IndexMap<QName, XsdType>,
    resolved: &mut HashMap<QName, Option<QName>>,
    chain: &mut Vec<QName>,
) -> Result<Option<QName>, ResolveError> {
    if builtins::is_builtin(name) && !types.contains_key(name) {
        return Ok(builtins::builtin_primitive(name));
    }
    if let Some(primitive) = resolved.get(name) {
        return Ok(primitive.clone());
    }
    if chain.contains(name) {
        return Err(ResolveError::CircularBase(name.to_string()));
    }
    let ty = types
        .get(name)
        .ok_or_else(|| ResolveError::UnresolvedType(name.to_string()))?;

    chain.push(name.clone());
    let primitive = match ty {
        XsdType::Simple(simple) => primitive_of_simple(simple, types, resolved, chain)?,
        _ => None,
    };
    chain.pop();

    resolved.insert(name.clone(), primitive.clone());
    Ok(primitive)
}

fn primitive_of_simple(
    simple: &SimpleType,
    types: &IndexMap<QName, XsdType>,
    resolved: &mut HashMap<QName, Option<QName>>,
    chain: &mut Vec<QName>,
) -> Result<Option<QName>, ResolveError> {
    if let Some(primitive) = &simple.primitive {
        return Ok(Some(primitive.clone()));
    }
    match &simple.base {
        None => Ok(None),
        Some(TypeRef::Named(base)) => primitive_of_named(base, types, resolved, chain),
        Some(TypeRef::Inline(inner)) => match inner.as_ref() {
            XsdType::Simple(inner) => primitive_of_simple(inner, types, resolved, chain),
            _ => Ok(None),
        },
    }
}
