//!
//! # Debug Printing
//!
//! Human-readable dumps of paths and their owners, one field or token per line.
//! Unlike the [crate::write] output, these are not valid DEF.
//!

// Std-Lib
use std::io::Write;

// Local Imports
use crate::cursor::PathCursor;
use crate::data::*;
use crate::net::*;
use crate::path::{DefPath, PathItem};

impl DefPath {
    /// Print each token, in order, to `f`
    pub fn print(&self, f: &mut impl Write) -> DefResult<()> {
        writeln!(f, "  Path:")?;
        let mut cursor = self.traverse();
        while let Some(item) = cursor.next() {
            match describe(&cursor, item) {
                Some(desc) => writeln!(f, "    {}", desc)?,
                None => writeln!(f, "    {:?} ?", item)?,
            }
        }
        Ok(())
    }
}
/// Describe the token under `cursor`, which has tag `item`
fn describe(cursor: &PathCursor, item: PathItem) -> Option<String> {
    let desc = match item {
        PathItem::Layer => format!("layer {}", cursor.layer()?),
        PathItem::Via => format!("via {}", cursor.via()?),
        PathItem::ViaRotation => format!("rotation {}", cursor.via_rotation()?),
        PathItem::ViaRect => {
            let r = cursor.via_rect()?;
            format!("rect ( {} {} {} {} )", r.dx1, r.dy1, r.dx2, r.dy2)
        }
        PathItem::ViaData => {
            let d = cursor.via_data()?;
            format!("do {} by {} step {} {}", d.num_x, d.num_y, d.step_x, d.step_y)
        }
        PathItem::Width => format!("width {}", cursor.width()?),
        PathItem::Point => format!("point {}", cursor.point()?),
        PathItem::FlushPoint => {
            let p = cursor.flush_point()?;
            format!("flushpoint ( {} {} {} )", p.x, p.y, p.ext)
        }
        PathItem::VirtualPoint => format!("virtual {}", cursor.virtual_point()?),
        PathItem::Mask => format!("mask {}", cursor.mask()?),
        PathItem::ViaMask => format!(
            "viamask top {} cut {} bottom {}",
            cursor.via_top_mask()?,
            cursor.via_cut_mask()?,
            cursor.via_bottom_mask()?
        ),
        PathItem::Taper => "taper".to_string(),
        PathItem::TaperRule => format!("taperrule {}", cursor.taper_rule()?),
        PathItem::Shape => format!("shape {}", cursor.shape()?),
        PathItem::Style => format!("style {}", cursor.style()?),
    };
    Some(desc)
}

impl DefWire {
    pub fn print(&self, f: &mut impl Write) -> DefResult<()> {
        match self.shield_net {
            Some(ref shielded) => writeln!(f, "+ {} {}", self.route, shielded)?,
            None => writeln!(f, "+ {}", self.route)?,
        }
        for path in self.paths() {
            path.print(f)?;
        }
        Ok(())
    }
}

impl DefShield {
    pub fn print(&self, f: &mut impl Write) -> DefResult<()> {
        self.print_labeled(f, "shield")
    }
    /// Print under heading `label`, shared by `SHIELD` and `NOSHIELD` groups
    fn print_labeled(&self, f: &mut impl Write, label: &str) -> DefResult<()> {
        writeln!(f, " {} '{}'", label, self.name)?;
        for path in self.paths() {
            path.print(f)?;
        }
        Ok(())
    }
}

/// Print a list of connections, under a `Pins:` header indented by `header`
fn print_pins(
    f: &mut impl Write,
    header: &str,
    indent: &str,
    conns: &[DefConnection],
) -> DefResult<()> {
    if conns.is_empty() {
        return Ok(());
    }
    writeln!(f, "{}Pins:", header)?;
    for conn in conns.iter() {
        writeln!(
            f,
            "{}'{}' '{}'{}{}",
            indent,
            conn.instance,
            conn.pin,
            if conn.must_join { " MUSTJOIN" } else { "" },
            if conn.synthesized { " SYNTHESIZED" } else { "" },
        )?;
    }
    Ok(())
}

impl DefSubnet {
    pub fn print(&self, f: &mut impl Write) -> DefResult<()> {
        writeln!(f, " subnet '{}'", self.name)?;
        if let Some(ref rule) = self.non_default_rule {
            writeln!(f, "  nondefault rule {}", rule)?;
        }
        print_pins(f, "  ", "   ", &self.connections)?;
        if !self.wires.is_empty() || !self.paths.is_empty() {
            writeln!(f, "  Paths:")?;
            for wire in self.wires.iter() {
                wire.print(f)?;
            }
            for path in self.paths() {
                path.print(f)?;
            }
        }
        Ok(())
    }
}

impl DefNet {
    pub fn print(&self, f: &mut impl Write) -> DefResult<()> {
        let kind = match self.kind {
            NetKind::Regular => "Net",
            NetKind::Special => "Special Net",
        };
        writeln!(f, "{} '{}'", kind, self.name)?;
        if let Some(weight) = self.weight {
            writeln!(f, "  weight={}", weight)?;
        }
        if let Some(ref u) = self.use_ {
            writeln!(f, "  use='{}'", u)?;
        }
        if let Some(ref rule) = self.non_default_rule {
            writeln!(f, "  nonDefaultRule='{}'", rule)?;
        }
        print_pins(f, " ", "  ", &self.connections)?;
        for name in self.shield_nets.iter() {
            writeln!(f, "  shieldnet '{}'", name)?;
        }
        for wire in self.wires.iter() {
            wire.print(f)?;
        }
        for shield in self.shields.iter() {
            shield.print(f)?;
        }
        for noshield in self.no_shields.iter() {
            noshield.print_labeled(f, "noshield")?;
        }
        for subnet in self.subnets.iter() {
            subnet.print(f)?;
        }
        Ok(())
    }
}
