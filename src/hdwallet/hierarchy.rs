/*
    Navigator over a tree of extended private keys rooted at a
    master key. Derived keys are cached by their raw index route
    so that walking related paths, e.g. sibling addresses under
    one account, only pays for each shared ancestor once.
*/

use crate::hdwallet::{derive_xprv, HDWError, Path, Xprv};
use std::collections::HashMap;

#[derive(Debug)]
pub struct Hierarchy {
    root: Xprv,
    cache: HashMap<Vec<u32>, Xprv>,
}

impl Hierarchy {
    pub fn new(root: Xprv) -> Self {
        Self {
            root,
            cache: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Xprv {
        &self.root
    }

    /// Derive the key at the given path from the root, reusing
    /// cached ancestors where possible. Failures carry the zero
    /// based index of the path segment that caused them.
    pub fn derive(&mut self, path: &Path) -> Result<Xprv, HDWError> {
        let mut route: Vec<u32> = Vec::with_capacity(path.len());
        let mut key = self.root;

        for (segment, child) in path.children.iter().enumerate() {
            let raw_index = child.raw_index().map_err(|e| HDWError::DerivationFailed {
                segment,
                source: Box::new(e),
            })?;
            route.push(raw_index);

            key = match self.cache.get(&route) {
                Some(cached) => *cached,
                None => {
                    let derived =
                        derive_xprv(&key, *child).map_err(|e| HDWError::DerivationFailed {
                            segment,
                            source: Box::new(e),
                        })?;
                    self.cache.insert(route.clone(), derived);
                    derived
                }
            };
        }

        Ok(key)
    }

    /// Number of derived keys currently held in the cache.
    pub fn cached_keys(&self) -> usize {
        self.cache.len()
    }
}
