use std::{collections::BTreeMap, io::Write};

use anyhow::{Context, Result};

use crate::slot::SlotName;

/// Host side of the display: receives one formatted string per slot.
pub trait DisplaySink {
    fn write_slot(&mut self, slot: SlotName, text: &str) -> Result<()>;
}

/// In-memory slot board. Later writes to a slot replace earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotBoard {
    slots: BTreeMap<SlotName, String>,
}

impl SlotBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: SlotName) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotName, &str)> {
        self.slots.iter().map(|(slot, text)| (*slot, text.as_str()))
    }
}

impl DisplaySink for SlotBoard {
    fn write_slot(&mut self, slot: SlotName, text: &str) -> Result<()> {
        self.slots.insert(slot, text.to_string());
        Ok(())
    }
}

/// Writes `Label: text` lines to any writer, labels padded to one column.
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    out: W,
    width: usize,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        let width = SlotName::all().iter().map(|s| s.label().len()).max().unwrap_or(0);
        Self { out, width }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    fn write_slot(&mut self, slot: SlotName, text: &str) -> Result<()> {
        let label = format!("{}:", slot.label());
        writeln!(self.out, "{label:<width$} {text}", width = self.width + 1)
            .with_context(|| format!("Failed to write slot '{slot}'"))
    }
}
