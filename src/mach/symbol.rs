use crate::error;
use crate::lang::Error;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// Scalars and arrays live in disjoint namespaces: a name is one or
/// the other, never both. Declaration is one-shot.

#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    vars: BTreeMap<Rc<str>, i32>,
    dims: BTreeMap<Rc<str>, Vec<i32>>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    pub fn clear(&mut self) {
        self.vars.clear();
        self.dims.clear();
    }

    pub fn exists(&self, name: &str) -> bool {
        self.vars.contains_key(name) || self.dims.contains_key(name)
    }

    pub fn is_scalar(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn is_array(&self, name: &str) -> bool {
        self.dims.contains_key(name)
    }

    fn redeclared(name: &str) -> Error {
        error!(Redeclaration; format!("'{}'", name))
    }

    pub fn declare_scalar(&mut self, name: &Rc<str>, value: i32) -> Result<()> {
        if self.exists(name) {
            return Err(SymbolTable::redeclared(name));
        }
        self.vars.insert(name.clone(), value);
        Ok(())
    }

    pub fn declare_array(&mut self, name: &Rc<str>, size: i32) -> Result<()> {
        if self.exists(name) {
            return Err(SymbolTable::redeclared(name));
        }
        let len = match usize::try_from(size) {
            Ok(len) if len > 0 => len,
            _ => return Err(error!(InvalidArraySize; format!("'{}' of size {}", name, size))),
        };
        self.dims.insert(name.clone(), vec![0; len]);
        Ok(())
    }

    fn not_scalar(&self, name: &str) -> Error {
        if self.dims.contains_key(name) {
            error!(NotAScalar; format!("'{}'", name))
        } else {
            error!(UndeclaredIdentifier; format!("'{}'", name))
        }
    }

    fn not_array(&self, name: &str) -> Error {
        not_array(&self.vars, name)
    }

    pub fn fetch(&self, name: &str) -> Result<i32> {
        match self.vars.get(name) {
            Some(value) => Ok(*value),
            None => Err(self.not_scalar(name)),
        }
    }

    pub fn store(&mut self, name: &str, value: i32) -> Result<()> {
        if let Some(var) = self.vars.get_mut(name) {
            *var = value;
            return Ok(());
        }
        Err(self.not_scalar(name))
    }

    pub fn array(&self, name: &str) -> Result<&[i32]> {
        match self.dims.get(name) {
            Some(arr) => Ok(arr.as_slice()),
            None => Err(self.not_array(name)),
        }
    }

    pub fn array_mut(&mut self, name: &str) -> Result<&mut [i32]> {
        match self.dims.get_mut(name) {
            Some(arr) => Ok(arr.as_mut_slice()),
            None => Err(not_array(&self.vars, name)),
        }
    }

    fn index(name: &str, len: usize, index: i32) -> Result<usize> {
        match usize::try_from(index) {
            Ok(i) if i < len => Ok(i),
            _ => Err(error!(SubscriptOutOfRange;
                format!("{}[{}] with size {}", name, index, len))),
        }
    }

    pub fn fetch_array(&self, name: &str, index: i32) -> Result<i32> {
        let arr = self.array(name)?;
        let i = SymbolTable::index(name, arr.len(), index)?;
        Ok(arr[i])
    }

    pub fn store_array(&mut self, name: &str, index: i32, value: i32) -> Result<()> {
        let arr = self.array_mut(name)?;
        let i = SymbolTable::index(name, arr.len(), index)?;
        arr[i] = value;
        Ok(())
    }

    pub fn scalars(&self) -> impl Iterator<Item = (&str, i32)> {
        self.vars.iter().map(|(k, v)| (k.as_ref(), *v))
    }

    pub fn arrays(&self) -> impl Iterator<Item = (&str, &[i32])> {
        self.dims.iter().map(|(k, v)| (k.as_ref(), v.as_slice()))
    }
}

fn not_array(vars: &BTreeMap<Rc<str>, i32>, name: &str) -> Error {
    if vars.contains_key(name) {
        error!(NotAnArray; format!("'{}'", name))
    } else {
        error!(UndeclaredIdentifier; format!("'{}'", name))
    }
}

impl std::fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (name, value) in self.scalars() {
            writeln!(f, "{} = {}", name, value)?;
        }
        for (name, values) in self.arrays() {
            writeln!(f, "{}[{}] = {:?}", name, values.len(), values)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_disjoint_namespaces() {
        let mut t = SymbolTable::new();
        let a: Rc<str> = "a".into();
        t.declare_scalar(&a, 0).unwrap();
        assert_eq!(
            t.declare_array(&a, 3).unwrap_err().code(),
            ErrorCode::Redeclaration
        );
        assert_eq!(
            t.declare_scalar(&a, 1).unwrap_err().code(),
            ErrorCode::Redeclaration
        );
        assert_eq!(t.fetch("a").unwrap(), 0);
        assert_eq!(t.fetch_array("a", 0).unwrap_err().code(), ErrorCode::NotAnArray);
        assert_eq!(t.fetch("b").unwrap_err().code(), ErrorCode::UndeclaredIdentifier);
    }

    #[test]
    fn test_array_bounds() {
        let mut t = SymbolTable::new();
        let b: Rc<str> = "b".into();
        t.declare_array(&b, 2).unwrap();
        t.store_array("b", 1, 9).unwrap();
        assert_eq!(t.array("b").unwrap(), &[0, 9]);
        assert_eq!(
            t.store_array("b", 2, 1).unwrap_err().code(),
            ErrorCode::SubscriptOutOfRange
        );
        assert_eq!(
            t.fetch_array("b", -1).unwrap_err().code(),
            ErrorCode::SubscriptOutOfRange
        );
        assert_eq!(t.store("b", 1).unwrap_err().code(), ErrorCode::NotAScalar);
    }

    #[test]
    fn test_array_mut() {
        let mut t = SymbolTable::new();
        t.declare_scalar(&"x".into(), 1).unwrap();
        t.declare_array(&"a".into(), 3).unwrap();
        t.array_mut("a").unwrap()[..2].copy_from_slice(&[4, 5]);
        assert_eq!(t.array("a").unwrap(), &[4, 5, 0]);
        assert_eq!(t.array_mut("x").unwrap_err().code(), ErrorCode::NotAnArray);
        assert_eq!(
            t.array_mut("y").unwrap_err().code(),
            ErrorCode::UndeclaredIdentifier
        );
    }

    #[test]
    fn test_invalid_size() {
        let mut t = SymbolTable::new();
        let c: Rc<str> = "c".into();
        assert_eq!(
            t.declare_array(&c, 0).unwrap_err().code(),
            ErrorCode::InvalidArraySize
        );
        assert!(!t.exists("c"));
    }

    #[test]
    fn test_display() {
        let mut t = SymbolTable::new();
        t.declare_scalar(&"x".into(), 5).unwrap();
        t.declare_array(&"a".into(), 2).unwrap();
        assert_eq!(t.to_string(), "x = 5\na[2] = [0, 0]\n");
    }
}
