//!
//! # Nets & Path Owners
//!
//! The DEF records which own routing [DefPath]s:
//! [DefWire]s and [DefShield]s, which group paths under a route-status or shield keyword,
//! and the [DefNet]s and [DefSubnet]s which own them in turn.
//!
//! Path lists grow by a configurable, capped doubling policy ([PathGrowth]).
//! Nets commonly have thousands of wires, each with only one or two paths;
//! special nets (power grids and the like) commonly have thousands of paths on a single wire.
//!

// Std-Lib
use std::path::Path;

// Crates.io Imports
use derive_builder::Builder;
use log::{debug, error};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Local Imports
use crate::data::*;
use crate::path::DefPath;
use crate::ser::SerdeFile;

/// # Path-List Growth Policy
///
/// Empty lists first reserve `initial` paths.
/// Lists then double in size, until doubling would exceed `max_increment` paths.
/// From there on they grow by exactly `max_increment`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathGrowth {
    pub initial: usize,
    pub max_increment: usize,
}
impl PathGrowth {
    /// Growth policy for regular nets
    pub const REGULAR: PathGrowth = PathGrowth {
        initial: 8,
        max_increment: 65536,
    };
    /// Growth policy for special nets
    pub const SPECIAL: PathGrowth = PathGrowth {
        initial: 1000,
        max_increment: 65536,
    };
    /// Get the policy for nets of kind `kind`
    pub fn for_kind(kind: NetKind) -> Self {
        match kind {
            NetKind::Regular => Self::REGULAR,
            NetKind::Special => Self::SPECIAL,
        }
    }
    /// Get the allocation following `allocated`
    pub fn next_allocation(&self, allocated: usize) -> usize {
        if allocated == 0 {
            return self.initial;
        }
        let doubled = allocated * 2;
        if doubled > self.max_increment {
            return allocated + self.max_increment;
        }
        doubled
    }
}
impl Default for PathGrowth {
    fn default() -> Self {
        Self::REGULAR
    }
}

/// # Path List
///
/// Growable list of [DefPath]s, allocated per a [PathGrowth] policy.
/// Serializes as a plain sequence of paths; the policy and allocation are not serialized.
#[derive(Clone, Default, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct PathList {
    paths: Vec<DefPath>,
    #[serde(skip)]
    growth: PathGrowth,
    #[serde(skip)]
    allocated: usize,
}
impl PathList {
    /// Create a new and empty [PathList] with growth policy `growth`
    pub fn new(growth: PathGrowth) -> Self {
        Self {
            paths: Vec::new(),
            growth,
            allocated: 0,
        }
    }
    /// Add `path`, first removing all existing paths if `reset` is set.
    ///
    /// Returns `true` if the list is now full, i.e. the next addition will reallocate.
    /// Callers wanting a deep copy of a path they keep using pass a `clone` of it;
    /// callers done with it move it in directly.
    pub fn add(&mut self, path: DefPath, reset: bool) -> bool {
        if reset {
            self.paths.clear();
        }
        if self.paths.len() >= self.allocated {
            let current = self.allocated.max(self.paths.len());
            let next = self.growth.next_allocation(current);
            debug!("Growing path list from {} to {} paths", self.allocated, next);
            self.paths.reserve_exact(next - self.paths.len());
            self.allocated = next;
        }
        self.paths.push(path);
        self.paths.len() == self.allocated
    }
    /// Number of paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
    /// Number of paths allocated for, per our growth policy
    pub fn allocated(&self) -> usize {
        self.allocated
    }
    pub fn growth(&self) -> PathGrowth {
        self.growth
    }
    /// Set the growth policy applied to future additions
    pub fn set_growth(&mut self, growth: PathGrowth) {
        self.growth = growth;
    }
    /// Get the path at `idx`, if there is one
    pub fn get(&self, idx: usize) -> Option<&DefPath> {
        self.paths.get(idx)
    }
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut DefPath> {
        self.paths.get_mut(idx)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, DefPath> {
        self.paths.iter()
    }
    pub fn as_slice(&self) -> &[DefPath] {
        &self.paths
    }
    /// Remove all paths, and release their allocation
    pub fn clear(&mut self) {
        self.paths = Vec::new();
        self.allocated = 0;
    }
}
impl PartialEq for PathList {
    /// Lists are equal if their paths are. Growth and allocation state are not compared.
    fn eq(&self, other: &Self) -> bool {
        self.paths == other.paths
    }
}
impl Eq for PathList {}
impl From<Vec<DefPath>> for PathList {
    fn from(paths: Vec<DefPath>) -> Self {
        let allocated = paths.len();
        Self {
            paths,
            growth: PathGrowth::default(),
            allocated,
        }
    }
}

///
/// # Path-Owner Trait
///
/// Shared interface of records which directly own a [PathList].
/// Implementers supply access to their list; the path operations are all provided.
///
pub trait PathOwner {
    /// Access our [PathList]
    fn path_list(&self) -> &PathList;
    /// Access our [PathList] mutably
    fn path_list_mut(&mut self) -> &mut PathList;

    /// Add `path`, optionally clearing existing paths first.
    /// Returns `true` when the list has become full. See [PathList::add].
    fn add_path(&mut self, path: DefPath, reset: bool) -> bool {
        self.path_list_mut().add(path, reset)
    }
    fn num_paths(&self) -> usize {
        self.path_list().len()
    }
    /// Get the path at `idx`, if there is one
    fn path(&self, idx: usize) -> Option<&DefPath> {
        self.path_list().get(idx)
    }
    fn paths(&self) -> &[DefPath] {
        self.path_list().as_slice()
    }
}

/// # Def Wire
///
/// One wiring statement of a net, e.g. `+ ROUTED M1 ( 0 0 ) ( 10 0 ) NEW M2 ( 10 0 ) ( 10 10 )`.
/// Each path begins at the statement's leading layer or at a `NEW`.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefWire {
    /// Route Status
    pub route: DefRouteStatus,
    /// Shielded Net Name, for `SHIELD` wires of special nets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shield_net: Option<String>,
    /// Paths
    #[serde(default, skip_serializing_if = "PathList::is_empty")]
    pub paths: PathList,
}
impl DefWire {
    /// Create a new and empty [DefWire]
    pub fn new(route: DefRouteStatus, shield_net: Option<String>, growth: PathGrowth) -> Self {
        Self {
            route,
            shield_net,
            paths: PathList::new(growth),
        }
    }
    /// Remove all paths and the shielded-net name
    pub fn clear(&mut self) {
        self.shield_net = None;
        self.paths.clear();
    }
}
impl PathOwner for DefWire {
    fn path_list(&self) -> &PathList {
        &self.paths
    }
    fn path_list_mut(&mut self) -> &mut PathList {
        &mut self.paths
    }
}

/// # Def Shield
///
/// A named group of shield paths, used for both the `SHIELD` (special nets)
/// and `NOSHIELD` (regular nets) forms.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefShield {
    /// Shield Net Name
    pub name: String,
    /// Paths
    #[serde(default, skip_serializing_if = "PathList::is_empty")]
    pub paths: PathList,
}
impl DefShield {
    /// Create a new and empty [DefShield]
    pub fn new(name: impl Into<String>, growth: PathGrowth) -> Self {
        Self {
            name: name.into(),
            paths: PathList::new(growth),
        }
    }
    pub fn clear(&mut self) {
        self.paths.clear();
    }
}
impl PathOwner for DefShield {
    fn path_list(&self) -> &PathList {
        &self.paths
    }
    fn path_list_mut(&mut self) -> &mut PathList {
        &mut self.paths
    }
}

/// # Def Connection
///
/// A net's connection to a component pin (or to an I/O pin, with `instance` of `PIN`).
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefConnection {
    /// Component Instance Name
    pub instance: String,
    /// Pin Name
    pub pin: String,
    /// Whether this is a `MUSTJOIN` connection
    #[serde(default)]
    pub must_join: bool,
    /// Whether this connection was `SYNTHESIZED`
    #[serde(default)]
    pub synthesized: bool,
}

/// # Def Subnet
///
/// A named subset of a net's connections, with its own wiring.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
pub struct DefSubnet {
    /// Subnet Name
    pub name: String,
    /// Connections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<DefConnection>,
    /// Non-Default Rule Name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub non_default_rule: Option<String>,
    /// Wires
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wires: Vec<DefWire>,
    /// Paths added directly to the subnet, outside of any wire.
    /// Retained for older producers; new content belongs in `wires`.
    #[serde(default, skip_serializing_if = "PathList::is_empty")]
    pub paths: PathList,
}
impl DefSubnet {
    /// Create a new and empty [DefSubnet]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            connections: Vec::new(),
            non_default_rule: None,
            wires: Vec::new(),
            paths: PathList::default(),
        }
    }
    /// Add a connection to `instance`'s pin `pin`
    pub fn add_pin(&mut self, instance: impl Into<String>, pin: impl Into<String>, synthesized: bool) {
        self.connections.push(DefConnection {
            instance: instance.into(),
            pin: pin.into(),
            must_join: false,
            synthesized,
        });
    }
    /// Add a `MUSTJOIN` connection
    pub fn add_must_pin(&mut self, instance: impl Into<String>, pin: impl Into<String>, synthesized: bool) {
        self.add_pin(instance, pin, synthesized);
        if let Some(conn) = self.connections.last_mut() {
            conn.must_join = true;
        }
    }
    pub fn set_non_default_rule(&mut self, name: impl Into<String>) {
        self.non_default_rule = Some(name.into());
    }
    /// Open a new wire with route-status `route`
    pub fn add_wire(&mut self, route: DefRouteStatus) {
        self.wires
            .push(DefWire::new(route, None, PathGrowth::REGULAR));
    }
    /// Add `path` to our most recent wire
    pub fn add_wire_path(&mut self, path: DefPath, reset: bool) -> DefResult<bool> {
        match self.wires.last_mut() {
            Some(wire) => Ok(wire.add_path(path, reset)),
            None => {
                error!("Subnet {} has no wire to add a path to", self.name);
                Err(DefError::Owner {
                    record: format!("SUBNET {}", self.name),
                    msg: "Path added before any wire".into(),
                })
            }
        }
    }
    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }
    pub fn wire(&self, idx: usize) -> Option<&DefWire> {
        self.wires.get(idx)
    }
    /// Reset to an empty subnet, keeping only our name
    pub fn clear(&mut self) {
        self.connections.clear();
        self.non_default_rule = None;
        self.wires.clear();
        self.paths.clear();
    }
}
impl PathOwner for DefSubnet {
    fn path_list(&self) -> &PathList {
        &self.paths
    }
    fn path_list_mut(&mut self) -> &mut PathList {
        &mut self.paths
    }
}

/// # Def Net
///
/// A net definition from either the `NETS` or `SPECIALNETS` section,
/// including its connections and routing.
///
/// Growth policy is not serialized. Deserialized nets re-apply the policy of their [NetKind]
/// to each wire and shield group.
#[derive(Clone, Builder, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[builder(pattern = "owned", setter(into))]
#[serde(remote = "DefNet")]
pub struct DefNet {
    // Required
    /// Net Name
    pub name: String,

    // Optional
    /// Regular or Special
    #[serde(default)]
    #[builder(default)]
    pub kind: NetKind,
    /// Connections
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub connections: Vec<DefConnection>,
    /// Wires
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub wires: Vec<DefWire>,
    /// Subnets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub subnets: Vec<DefSubnet>,
    /// `SHIELD` Path Groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub shields: Vec<DefShield>,
    /// `NOSHIELD` Path Groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub no_shields: Vec<DefShield>,
    /// Shield Net Names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub shield_nets: Vec<String>,
    /// Non-Default Rule Name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub non_default_rule: Option<String>,
    /// Usage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename(serialize = "use", deserialize = "use"))]
    #[builder(default, setter(strip_option))]
    pub use_: Option<DefNetUse>,
    /// Weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub weight: Option<i32>,
}
impl DefNet {
    /// Create a new and initially empty regular [DefNet] named `name`
    pub fn new(name: impl Into<String>) -> DefNet {
        Self::with_kind(name, NetKind::Regular)
    }
    /// Create a new and initially empty special [DefNet] named `name`
    pub fn special(name: impl Into<String>) -> DefNet {
        Self::with_kind(name, NetKind::Special)
    }
    fn with_kind(name: impl Into<String>, kind: NetKind) -> DefNet {
        DefNet {
            name: name.into(),
            kind,
            connections: Vec::new(),
            wires: Vec::new(),
            subnets: Vec::new(),
            shields: Vec::new(),
            no_shields: Vec::new(),
            shield_nets: Vec::new(),
            non_default_rule: None,
            use_: None,
            weight: None,
        }
    }
    /// Add a connection to `instance`'s pin `pin`
    pub fn add_pin(&mut self, instance: impl Into<String>, pin: impl Into<String>, synthesized: bool) {
        self.connections.push(DefConnection {
            instance: instance.into(),
            pin: pin.into(),
            must_join: false,
            synthesized,
        });
    }
    /// Add a `MUSTJOIN` connection
    pub fn add_must_pin(&mut self, instance: impl Into<String>, pin: impl Into<String>, synthesized: bool) {
        self.add_pin(instance, pin, synthesized);
        if let Some(conn) = self.connections.last_mut() {
            conn.must_join = true;
        }
    }
    /// Open a new wire with route-status `route`.
    /// `shield_net` names the shielded net of `SHIELD` wires.
    pub fn add_wire(&mut self, route: DefRouteStatus, shield_net: Option<String>) {
        let growth = self.growth();
        self.wires.push(DefWire::new(route, shield_net, growth));
    }
    /// Add `path` to our most recent wire.
    /// Returns `true` when that wire's path list has become full.
    pub fn add_wire_path(&mut self, path: DefPath, reset: bool) -> DefResult<bool> {
        match self.wires.last_mut() {
            Some(wire) => Ok(wire.add_path(path, reset)),
            None => self.fail("Path added before any wire"),
        }
    }
    /// Open a new `SHIELD` path group, shielding net `name`
    pub fn add_shield(&mut self, name: impl Into<String>) {
        let growth = self.growth();
        self.shields.push(DefShield::new(name, growth));
    }
    /// Open a new `NOSHIELD` path group
    pub fn add_no_shield(&mut self, name: impl Into<String>) {
        let growth = self.growth();
        self.no_shields.push(DefShield::new(name, growth));
    }
    /// Add `path` to our most recent shield group.
    /// Goes to the most recent `SHIELD` group if there are any, and otherwise the most recent `NOSHIELD` group.
    pub fn add_shield_path(&mut self, path: DefPath, reset: bool) -> DefResult<bool> {
        let group = match self.shields.last_mut() {
            Some(s) => Some(s),
            None => self.no_shields.last_mut(),
        };
        match group {
            Some(group) => Ok(group.add_path(path, reset)),
            None => self.fail("Shield path added before any SHIELD or NOSHIELD"),
        }
    }
    /// Add a `SHIELDNET` name
    pub fn add_shield_net(&mut self, name: impl Into<String>) {
        self.shield_nets.push(name.into());
    }
    pub fn add_subnet(&mut self, subnet: DefSubnet) {
        self.subnets.push(subnet);
    }
    pub fn set_non_default_rule(&mut self, name: impl Into<String>) {
        self.non_default_rule = Some(name.into());
    }
    pub fn set_use(&mut self, use_: DefNetUse) {
        self.use_ = Some(use_);
    }
    pub fn set_weight(&mut self, weight: i32) {
        self.weight = Some(weight);
    }

    pub fn num_wires(&self) -> usize {
        self.wires.len()
    }
    pub fn wire(&self, idx: usize) -> Option<&DefWire> {
        self.wires.get(idx)
    }
    pub fn num_shields(&self) -> usize {
        self.shields.len()
    }
    pub fn shield(&self, idx: usize) -> Option<&DefShield> {
        self.shields.get(idx)
    }
    pub fn num_no_shields(&self) -> usize {
        self.no_shields.len()
    }
    pub fn no_shield(&self, idx: usize) -> Option<&DefShield> {
        self.no_shields.get(idx)
    }
    pub fn num_subnets(&self) -> usize {
        self.subnets.len()
    }
    pub fn subnet(&self, idx: usize) -> Option<&DefSubnet> {
        self.subnets.get(idx)
    }
    /// Total number of paths over all wires
    pub fn num_wire_paths(&self) -> usize {
        self.wires.iter().map(|w| w.num_paths()).sum()
    }
    /// Reset to an empty net, keeping only our name and kind
    pub fn clear(&mut self) {
        let name = std::mem::take(&mut self.name);
        *self = Self::with_kind(name, self.kind);
    }
    /// Path-list growth policy for our wires and shields
    fn growth(&self) -> PathGrowth {
        PathGrowth::for_kind(self.kind)
    }
    /// Apply our growth policy to every wire and shield group
    fn apply_growth(&mut self) {
        let growth = self.growth();
        for wire in self.wires.iter_mut() {
            wire.paths.set_growth(growth);
        }
        for shield in self.shields.iter_mut().chain(self.no_shields.iter_mut()) {
            shield.paths.set_growth(growth);
        }
    }
    /// Log and return an owner-state error
    fn fail<T>(&self, msg: &str) -> DefResult<T> {
        error!("Net {}: {}", self.name, msg);
        Err(DefError::Owner {
            record: format!("NET {}", self.name),
            msg: msg.into(),
        })
    }
}

impl Serialize for DefNet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        DefNet::serialize(self, serializer)
    }
}
impl<'de> Deserialize<'de> for DefNet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut net = DefNet::deserialize(deserializer)?;
        net.apply_growth();
        Ok(net)
    }
}

/// # Def Routing
///
/// The routing content of a DEF design: its `NETS` and `SPECIALNETS` sections.
#[derive(Clone, Default, Builder, Debug, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[builder(pattern = "owned", setter(into))]
pub struct DefRouting {
    /// DEF Version
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(strip_option))]
    pub version: Option<DefDecimal>,
    /// Special Nets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub special_nets: Vec<DefNet>,
    /// Regular Nets
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[builder(default)]
    pub nets: Vec<DefNet>,
}
impl DefRouting {
    /// Create a new and initially empty [DefRouting].
    /// Also available via [Default].
    pub fn new() -> DefRouting {
        DefRouting::default()
    }
    /// Add `net` to the section matching its [NetKind]
    pub fn add_net(&mut self, net: DefNet) {
        match net.kind {
            NetKind::Regular => self.nets.push(net),
            NetKind::Special => self.special_nets.push(net),
        }
    }
    /// Write to a DEF-format [String]
    pub fn to_def_string(&self) -> DefResult<String> {
        super::write::to_string(self)
    }
    /// Write DEF-format content to file `fname`
    pub fn save_def(&self, fname: impl AsRef<Path>) -> DefResult<()> {
        super::write::save(self, fname)
    }
}

// Implement serialization to/from file for routing and individual nets
impl SerdeFile for DefRouting {}
impl SerdeFile for DefNet {}
