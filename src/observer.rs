//! Observer pattern for cauldrons - crafting pub/sub
//!
//! Collaborators (displays, inventories, quest logic) subscribe to a
//! cauldron and receive an event for every resolution outcome. The cauldron
//! never polls its consumers; each craft or fix pushes its result out.

use crate::element::Element;

/// Which composition a gate was judging when it fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CraftStage {
    /// The additive, before combination.
    Additive,
    /// The combined octonionic result.
    Result,
}

/// Event emitted by a cauldron when a craft or fix resolves.
#[derive(Clone, Debug)]
pub enum CraftEvent {
    /// A composition's norm exceeded the cauldron's strength.
    StrengthExceeded {
        stage: CraftStage,
        strength: f64,
        limit: f64,
    },
    /// One or more elements exceeded the cauldron's mastery; carries the
    /// per-element deficits.
    MasteryExceeded {
        stage: CraftStage,
        deficits: Vec<(Element, f64)>,
    },
    /// The craft passed its gates but the quality fell below the ash
    /// threshold.
    AshProduced { quality: f64 },
    /// A usable material came out.
    Crafted { quality: f64, strength: f64 },
    /// A remediation attempt finished.
    Remediated { success: bool },
}

/// Observer that receives cauldron events.
pub trait CraftObserver: Send + Sync {
    /// Called when a cauldron event occurs.
    fn on_event(&self, event: CraftEvent);
}

/// Function-based observer for simple cases.
pub struct FnObserver<F: Fn(CraftEvent) + Send + Sync>(pub F);

impl<F: Fn(CraftEvent) + Send + Sync> CraftObserver for FnObserver<F> {
    fn on_event(&self, event: CraftEvent) {
        (self.0)(event);
    }
}

/// Channel-based observer - sends events to a channel.
pub struct ChannelObserver {
    sender: std::sync::mpsc::Sender<CraftEvent>,
}

impl ChannelObserver {
    pub fn new(sender: std::sync::mpsc::Sender<CraftEvent>) -> Self {
        Self { sender }
    }
}

impl CraftObserver for ChannelObserver {
    fn on_event(&self, event: CraftEvent) {
        let _ = self.sender.send(event);
    }
}
