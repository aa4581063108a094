//!
//! # Def Writer Module
//!
//! Writes the `SPECIALNETS` and `NETS` sections of a [DefRouting].
//! Every path is replayed token by token through a [crate::PathCursor].
//!

// Std-Lib
use std::io::Write;
use std::ops::{AddAssign, SubAssign};
use std::path::Path;

// Crates.io Imports
use log::debug;

// Local Imports
use crate::data::*;
use crate::net::*;
use crate::path::{DefPath, PathItem};

/// Write a [DefRouting] to file `fname`.
pub fn save(routing: &DefRouting, fname: impl AsRef<Path>) -> DefResult<()> {
    let f = std::fs::File::create(fname)?;
    DefWriter::new(f).write_routing(routing)
}
/// Write a [DefRouting] to a DEF-format [String].
pub fn to_string(routing: &DefRouting) -> DefResult<String> {
    let mut buf = Vec::new();
    DefWriter::new(&mut buf).write_routing(routing)?;
    let rv = std::str::from_utf8(buf.as_slice())?.to_string();
    Ok(rv)
}

/// # Def Writing Helper
pub struct DefWriter<'wr> {
    /// Write Destination
    dest: Box<dyn Write + 'wr>,
    /// Indentation Helper
    indent: Indent,
    /// Session State
    session: DefWriterSession,
}
impl<'wr> DefWriter<'wr> {
    /// Create a new [DefWriter] to destination `dest`.
    /// Destination is boxed internally.
    pub fn new(dest: impl Write + 'wr) -> Self {
        Self {
            dest: Box::new(dest),
            indent: Indent::new("    "),
            session: DefWriterSession::default(),
        }
    }
    /// Write a [DefRouting] to the destination.
    /// Special nets are written first, as DEF orders them.
    pub fn write_routing(&mut self, routing: &DefRouting) -> DefResult<()> {
        if let Some(ref v) = routing.version {
            self.session.def_version = *v;
            self.write_line(format_args!("{} {} ;", DefKey::Version, v))?;
        }
        if !routing.special_nets.is_empty() {
            self.write_section(DefKey::SpecialNets, &routing.special_nets)?;
        }
        if !routing.nets.is_empty() {
            self.write_section(DefKey::Nets, &routing.nets)?;
        }
        self.dest.flush()?;
        Ok(())
    }
    /// Write a `NETS` or `SPECIALNETS` section
    fn write_section(&mut self, key: DefKey, nets: &[DefNet]) -> DefResult<()> {
        debug!("Writing {} section with {} nets", key, nets.len());
        self.write_line(format_args!("{} {} ;", key, nets.len()))?;
        self.indent += 1;
        for net in nets.iter() {
            self.write_net(net)?;
        }
        self.indent -= 1;
        self.write_line(format_args!("{} {}", DefKey::End, key))?;
        Ok(())
    }
    /// Write a [DefNet] definition
    fn write_net(&mut self, net: &DefNet) -> DefResult<()> {
        let special = net.kind == NetKind::Special;
        let conns = connections(&net.connections);
        self.write_line(format_args!("- {}{}", net.name, conns))?;
        self.indent += 1;
        for name in net.shield_nets.iter() {
            self.write_line(format_args!("+ {} {}", DefKey::ShieldNet, name))?;
        }
        for subnet in net.subnets.iter() {
            self.write_subnet(subnet)?;
        }
        if let Some(ref rule) = net.non_default_rule {
            self.write_line(format_args!("+ {} {}", DefKey::NonDefaultRule, rule))?;
        }
        for wire in net.wires.iter() {
            let lead = match wire.shield_net {
                Some(ref shielded) => format!("+ {} {}", wire.route, shielded),
                None => format!("+ {}", wire.route),
            };
            self.write_paths(&lead, wire.paths(), special)?;
        }
        for shield in net.shields.iter() {
            let lead = format!("+ {} {}", DefRouteStatus::Shield, shield.name);
            self.write_paths(&lead, shield.paths(), special)?;
        }
        for noshield in net.no_shields.iter() {
            let lead = format!("+ {}", DefRouteStatus::NoShield);
            self.write_paths(&lead, noshield.paths(), special)?;
        }
        if let Some(ref u) = net.use_ {
            self.write_line(format_args!("+ {} {}", DefKey::Use, u))?;
        }
        if let Some(ref w) = net.weight {
            self.write_line(format_args!("+ {} {}", DefKey::Weight, w))?;
        }
        self.write_line(format_args!(";"))?;
        self.indent -= 1;
        Ok(())
    }
    /// Write a [DefSubnet]. Subnet wiring omits the leading `+` of net-level wiring.
    fn write_subnet(&mut self, subnet: &DefSubnet) -> DefResult<()> {
        let conns = connections(&subnet.connections);
        self.write_line(format_args!("+ {} {}{}", DefKey::Subnet, subnet.name, conns))?;
        self.indent += 1;
        if let Some(ref rule) = subnet.non_default_rule {
            self.write_line(format_args!("{} {}", DefKey::NonDefaultRule, rule))?;
        }
        for wire in subnet.wires.iter() {
            let lead = wire.route.to_string();
            self.write_paths(&lead, wire.paths(), false)?;
        }
        if !subnet.paths.is_empty() {
            // Paths held outside any wire are written as one more routed wire
            let lead = DefRouteStatus::Routed.to_string();
            self.write_paths(&lead, subnet.paths(), false)?;
        }
        self.indent -= 1;
        Ok(())
    }
    /// Write a sequence of paths. The first follows `lead`, and each later path starts a `NEW` line.
    fn write_paths(&mut self, lead: &str, paths: &[DefPath], special: bool) -> DefResult<()> {
        if paths.is_empty() {
            self.write_line(format_args!("{}", lead))?;
            return Ok(());
        }
        for (idx, path) in paths.iter().enumerate() {
            let body = self.path_text(path, special)?;
            if idx == 0 {
                self.write_line(format_args!("{}{}", lead, body))?;
            } else {
                self.write_line(format_args!("{}{}", DefKey::New, body))?;
            }
        }
        Ok(())
    }
    /// Render the tokens of `path`, each with a leading space
    fn path_text(&self, path: &DefPath, special: bool) -> DefResult<String> {
        let mut text = String::new();
        let mut cursor = path.traverse();
        while let Some(item) = cursor.next() {
            let tok = match item {
                PathItem::Layer => cursor.layer().map(|s| format!(" {}", s)),
                PathItem::Via => cursor.via().map(|s| format!(" {}", s)),
                PathItem::ViaRotation => cursor.via_rotation().map(|o| format!(" {}", o)),
                PathItem::Width => cursor.width().map(|w| format!(" {}", w)),
                PathItem::Point => cursor.point().map(|p| format!(" {}", p)),
                PathItem::Taper => Some(format!(" {}", DefKey::Taper)),
                PathItem::TaperRule => cursor
                    .taper_rule()
                    .map(|s| format!(" {} {}", DefKey::TaperRule, s)),
                PathItem::Shape => cursor.shape().map(|s| format!(" + {} {}", DefKey::Shape, s)),
                // Special wiring marks style as a `+` option
                PathItem::Style => cursor.style().map(|s| {
                    if special {
                        format!(" + {} {}", DefKey::Style, s)
                    } else {
                        format!(" {} {}", DefKey::Style, s)
                    }
                }),
                PathItem::ViaData => cursor.via_data().map(|d| {
                    format!(
                        " {} {} {} {} {} {} {}",
                        DefKey::Do,
                        d.num_x,
                        DefKey::By,
                        d.num_y,
                        DefKey::Step,
                        d.step_x,
                        d.step_y
                    )
                }),
                PathItem::FlushPoint => cursor
                    .flush_point()
                    .map(|p| format!(" ( {} {} {} )", p.x, p.y, p.ext)),
                PathItem::ViaRect => {
                    self.require(DefKey::Rect)?;
                    cursor.via_rect().map(|r| {
                        format!(" {} ( {} {} {} {} )", DefKey::Rect, r.dx1, r.dy1, r.dx2, r.dy2)
                    })
                }
                PathItem::VirtualPoint => {
                    self.require(DefKey::Virtual)?;
                    cursor
                        .virtual_point()
                        .map(|p| format!(" {} {}", DefKey::Virtual, p))
                }
                PathItem::Mask => {
                    self.require(DefKey::Mask)?;
                    cursor.mask().map(|m| format!(" {} {}", DefKey::Mask, m))
                }
                PathItem::ViaMask => {
                    self.require(DefKey::Mask)?;
                    cursor.via_mask().map(|m| {
                        format!(" {} {}{}{}", DefKey::Mask, m.top(), m.cut(), m.bottom())
                    })
                }
            };
            match tok {
                Some(tok) => text.push_str(&tok),
                None => return DefError::fail(format!("Unreadable path token {:?}", item)),
            }
        }
        Ok(text)
    }
    /// Fail if `key` is not supported by the DEF version being written
    fn require(&self, key: DefKey) -> DefResult<()> {
        if self.session.def_version < *V5P8 {
            return Err(DefError::Version {
                key,
                version: self.session.def_version,
            });
        }
        Ok(())
    }
    /// Helper function writing a single line at the current indentation level.
    /// Note while the newline character is added, any trailing semicolons are not.
    fn write_line(&mut self, args: std::fmt::Arguments) -> std::io::Result<()> {
        writeln!(self.dest, "{}{}", self.indent.state, args)
    }
}
/// Render a list of connections, each with a leading space
fn connections(conns: &[DefConnection]) -> String {
    let mut rv = String::new();
    for conn in conns.iter() {
        if conn.must_join {
            rv.push_str(&format!(" {}", DefKey::MustJoin));
        }
        rv.push_str(&format!(" ( {} {}", conn.instance, conn.pin));
        if conn.synthesized {
            rv.push_str(&format!(" + {}", DefKey::Synthesized));
        }
        rv.push_str(" )");
    }
    rv
}

/// State kept over the course of a write
struct DefWriterSession {
    def_version: DefDecimal,
}
impl Default for DefWriterSession {
    /// Default version is v5.8
    fn default() -> Self {
        Self {
            def_version: *V5P8,
        }
    }
}

/// Indentation Helper
struct Indent {
    unit: String,
    level: usize,
    state: String,
}
impl Indent {
    /// Create a new [Indent], initially at level 0
    fn new(unit: impl Into<String>) -> Self {
        Self {
            unit: unit.into(),
            level: 0,
            state: String::new(),
        }
    }
}
impl AddAssign<usize> for Indent {
    fn add_assign(&mut self, rhs: usize) {
        self.level += rhs;
        self.state = self.unit.repeat(self.level);
    }
}
impl SubAssign<usize> for Indent {
    fn sub_assign(&mut self, rhs: usize) {
        self.level = self.level.saturating_sub(rhs);
        self.state = self.unit.repeat(self.level);
    }
}
