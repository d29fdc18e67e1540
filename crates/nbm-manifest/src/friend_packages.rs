//! Packages a module exposes to its friends

/// A single exposed package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendPackage {
    pub name: String,
    pub include_subpackages: bool,
}

impl FriendPackage {
    /// Pattern used in the descriptor: `pkg.*`, or `pkg.**` with sub-packages
    pub fn pattern(&self) -> String {
        if self.include_subpackages {
            format!("{}.**", self.name)
        } else {
            format!("{}.*", self.name)
        }
    }
}

/// Ordered list of exposed packages. Names are opaque tokens and are kept
/// exactly as added, duplicates included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendPackages {
    packages: Vec<FriendPackage>,
}

impl FriendPackages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, package_name: impl Into<String>) {
        self.packages.push(FriendPackage {
            name: package_name.into(),
            include_subpackages: false,
        });
    }

    pub fn add_with_subpackages(&mut self, package_name: impl Into<String>) {
        self.packages.push(FriendPackage {
            name: package_name.into(),
            include_subpackages: true,
        });
    }

    pub fn packages(&self) -> &[FriendPackage] {
        &self.packages
    }

    pub fn patterns(&self) -> Vec<String> {
        self.packages.iter().map(FriendPackage::pattern).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }
}
