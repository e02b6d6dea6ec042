//! Player capability modules.
//!
//! Each kind owns one capability value and its own upgrade economics. A
//! player holds at most one module per kind in a typed registry
//! (`ModuleSet`) — lookup is a field access, never a name comparison.
//! A missing module means the capability is unavailable, which actions
//! report distinctly from a zero-valued one.

use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::types::{AddonConfig, CapacityModuleConfig, RangeModuleConfig, Rules};

/// Level cap for the five base modules.
pub const BASE_MODULE_LEVEL_CAP: u8 = 7;
/// Add-ons allow a single upgrade.
pub const ADDON_LEVEL_CAP: u8 = 2;

const ICE_MULTIPLIER_BASE: f32 = 2.0;
const ICE_MULTIPLIER_UPGRADED: f32 = 3.0;
const FUSION_MULTIPLIER_BASE: f32 = 1.5;
const FUSION_MULTIPLIER_UPGRADED: f32 = 2.0;
const EXPLOSIVES_DEBRIS_RADIUS_BASE: i32 = 0;
const EXPLOSIVES_EXTRA_RANGE_BASE: i32 = 2;

// ---------------------------------------------------------------------------
// Module kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleKind {
    Drill,
    Telescope,
    Reactor,
    LaunchBay,
    Factory,
    IcePenetrator,
    FusionReactor,
    ExplosivesLab,
    WarpDrive,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 9] = [
        ModuleKind::Drill,
        ModuleKind::Telescope,
        ModuleKind::Reactor,
        ModuleKind::LaunchBay,
        ModuleKind::Factory,
        ModuleKind::IcePenetrator,
        ModuleKind::FusionReactor,
        ModuleKind::ExplosivesLab,
        ModuleKind::WarpDrive,
    ];
}

impl std::fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModuleKind::Drill => "Drill",
            ModuleKind::Telescope => "Telescope",
            ModuleKind::Reactor => "Reactor",
            ModuleKind::LaunchBay => "LaunchBay",
            ModuleKind::Factory => "Factory",
            ModuleKind::IcePenetrator => "IcePenetrator",
            ModuleKind::FusionReactor => "NERVA",
            ModuleKind::ExplosivesLab => "ExplosivesLab",
            ModuleKind::WarpDrive => "WarpDrive",
        };
        f.write_str(name)
    }
}

/// Preconditions shared by every upgrade: below the level cap, and
/// affordable. No state is touched on failure.
fn check_upgrade(kind: ModuleKind, cap: u8, level: u8, cost: f32, money: f32) -> Result<(), ActionError> {
    if level >= cap {
        return Err(ActionError::LevelCapReached(kind));
    }
    if money < cost {
        return Err(ActionError::InsufficientFunds {
            needed: cost,
            available: money,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Base modules
// ---------------------------------------------------------------------------

/// Manual mining capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drill {
    pub level: u8,
    pub upgrade_cost: f32,
    pub mining_capacity: f32,
}

impl Drill {
    pub fn new(cfg: &CapacityModuleConfig) -> Self {
        Self {
            level: 1,
            upgrade_cost: cfg.upgrade_cost,
            mining_capacity: cfg.initial,
        }
    }

    pub fn upgrade(&mut self, money: &mut f32, cfg: &CapacityModuleConfig) -> Result<String, ActionError> {
        check_upgrade(ModuleKind::Drill, BASE_MODULE_LEVEL_CAP, self.level, self.upgrade_cost, *money)?;
        *money -= self.upgrade_cost;
        self.level += 1;
        self.upgrade_cost += cfg.cost_increase;
        let old = self.mining_capacity;
        self.mining_capacity += cfg.upgrade_increment;
        Ok(format!(
            "Drill upgraded: mining capacity {old:.0} -> {:.0}. Next upgrade costs ${:.0}.",
            self.mining_capacity, self.upgrade_cost
        ))
    }
}

/// Fog-of-war reveal radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Telescope {
    pub level: u8,
    pub upgrade_cost: f32,
    pub discovery_range: i32,
}

impl Telescope {
    pub fn new(cfg: &RangeModuleConfig) -> Self {
        Self {
            level: 1,
            upgrade_cost: cfg.upgrade_cost,
            discovery_range: cfg.initial,
        }
    }

    pub fn upgrade(&mut self, money: &mut f32, cfg: &RangeModuleConfig) -> Result<String, ActionError> {
        check_upgrade(ModuleKind::Telescope, BASE_MODULE_LEVEL_CAP, self.level, self.upgrade_cost, *money)?;
        *money -= self.upgrade_cost;
        self.level += 1;
        self.upgrade_cost += cfg.cost_increase;
        let old = self.discovery_range;
        self.discovery_range += cfg.upgrade_increment;
        Ok(format!(
            "Telescope upgraded: discovery range {old} -> {}. Next upgrade costs ${:.0}.",
            self.discovery_range, self.upgrade_cost
        ))
    }
}

/// Movement budget per turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reactor {
    pub level: u8,
    pub upgrade_cost: f32,
    pub movement_range: i32,
}

impl Reactor {
    pub fn new(cfg: &RangeModuleConfig) -> Self {
        Self {
            level: 1,
            upgrade_cost: cfg.upgrade_cost,
            movement_range: cfg.initial,
        }
    }

    pub fn upgrade(&mut self, money: &mut f32, cfg: &RangeModuleConfig) -> Result<String, ActionError> {
        check_upgrade(ModuleKind::Reactor, BASE_MODULE_LEVEL_CAP, self.level, self.upgrade_cost, *money)?;
        *money -= self.upgrade_cost;
        self.level += 1;
        self.upgrade_cost += cfg.cost_increase;
        let old = self.movement_range;
        self.movement_range += cfg.upgrade_increment;
        Ok(format!(
            "Reactor upgraded: movement range {old} -> {}. Next upgrade costs ${:.0}.",
            self.movement_range, self.upgrade_cost
        ))
    }
}

/// Robot deployment (and debris targeting) reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchBay {
    pub level: u8,
    pub upgrade_cost: f32,
    pub robot_range: i32,
}

impl LaunchBay {
    pub fn new(cfg: &RangeModuleConfig) -> Self {
        Self {
            level: 1,
            upgrade_cost: cfg.upgrade_cost,
            robot_range: cfg.initial,
        }
    }

    pub fn upgrade(&mut self, money: &mut f32, cfg: &RangeModuleConfig) -> Result<String, ActionError> {
        check_upgrade(ModuleKind::LaunchBay, BASE_MODULE_LEVEL_CAP, self.level, self.upgrade_cost, *money)?;
        *money -= self.upgrade_cost;
        self.level += 1;
        self.upgrade_cost += cfg.cost_increase;
        let old = self.robot_range;
        self.robot_range += cfg.upgrade_increment;
        Ok(format!(
            "LaunchBay upgraded: robot range {old} -> {}. Next upgrade costs ${:.0}.",
            self.robot_range, self.upgrade_cost
        ))
    }
}

/// Capacity of newly deployed robots, plus the per-turn production quota.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    pub level: u8,
    pub upgrade_cost: f32,
    pub robot_capacity: f32,
    pub robot_production: u32,
    pub robots_produced_this_turn: u32,
}

impl Factory {
    pub fn new(cfg: &CapacityModuleConfig) -> Self {
        Self {
            level: 1,
            upgrade_cost: cfg.upgrade_cost,
            robot_capacity: cfg.initial,
            robot_production: 1,
            robots_produced_this_turn: 0,
        }
    }

    pub fn quota_spent(&self) -> bool {
        self.robots_produced_this_turn >= self.robot_production
    }

    pub fn upgrade(&mut self, money: &mut f32, cfg: &CapacityModuleConfig) -> Result<String, ActionError> {
        check_upgrade(ModuleKind::Factory, BASE_MODULE_LEVEL_CAP, self.level, self.upgrade_cost, *money)?;
        *money -= self.upgrade_cost;
        // Production quota grows on the upgrades out of levels 1 and 3.
        if matches!(self.level, 1 | 3) {
            self.robot_production += 1;
        }
        self.level += 1;
        self.upgrade_cost += cfg.cost_increase;
        let old = self.robot_capacity;
        self.robot_capacity += cfg.upgrade_increment;
        Ok(format!(
            "Factory upgraded: robot capacity {old:.0} -> {:.0}. Next upgrade costs ${:.0}.",
            self.robot_capacity, self.upgrade_cost
        ))
    }
}

// ---------------------------------------------------------------------------
// Add-on modules
// ---------------------------------------------------------------------------

/// Multiplies drill capacity when mining ice asteroids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcePenetrator {
    pub level: u8,
    pub upgrade_cost: f32,
    pub multiplier: f32,
}

impl IcePenetrator {
    pub fn new(cfg: &AddonConfig) -> Self {
        Self {
            level: 1,
            upgrade_cost: cfg.upgrade_cost,
            multiplier: ICE_MULTIPLIER_BASE,
        }
    }

    pub fn upgrade(&mut self, money: &mut f32) -> Result<String, ActionError> {
        check_upgrade(ModuleKind::IcePenetrator, ADDON_LEVEL_CAP, self.level, self.upgrade_cost, *money)?;
        *money -= self.upgrade_cost;
        self.level = 2;
        self.multiplier = ICE_MULTIPLIER_UPGRADED;
        Ok(format!(
            "IcePenetrator upgraded: ice mining multiplier is now {:.0}x.",
            self.multiplier
        ))
    }
}

/// "NERVA" — multiplies reactor movement range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionReactor {
    pub level: u8,
    pub upgrade_cost: f32,
    pub movement_multiplier: f32,
}

impl FusionReactor {
    pub fn new(cfg: &AddonConfig) -> Self {
        Self {
            level: 1,
            upgrade_cost: cfg.upgrade_cost,
            movement_multiplier: FUSION_MULTIPLIER_BASE,
        }
    }

    pub fn upgrade(&mut self, money: &mut f32) -> Result<String, ActionError> {
        check_upgrade(ModuleKind::FusionReactor, ADDON_LEVEL_CAP, self.level, self.upgrade_cost, *money)?;
        *money -= self.upgrade_cost;
        self.level = 2;
        self.movement_multiplier = FUSION_MULTIPLIER_UPGRADED;
        Ok(format!(
            "NERVA upgraded: movement multiplier is now {:.1}x.",
            self.movement_multiplier
        ))
    }
}

/// Widens the debris footprint and extends debris targeting reach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosivesLab {
    pub level: u8,
    pub upgrade_cost: f32,
    /// Added to the base footprint radius of 1.
    pub debris_radius: i32,
    /// Debris targeting reach beyond launch-bay range.
    pub extra_range: i32,
}

impl ExplosivesLab {
    pub fn new(cfg: &AddonConfig) -> Self {
        Self {
            level: 1,
            upgrade_cost: cfg.upgrade_cost,
            debris_radius: EXPLOSIVES_DEBRIS_RADIUS_BASE,
            extra_range: EXPLOSIVES_EXTRA_RANGE_BASE,
        }
    }

    pub fn upgrade(&mut self, money: &mut f32) -> Result<String, ActionError> {
        check_upgrade(ModuleKind::ExplosivesLab, ADDON_LEVEL_CAP, self.level, self.upgrade_cost, *money)?;
        *money -= self.upgrade_cost;
        self.level = 2;
        self.debris_radius += 1;
        self.extra_range += 1;
        Ok("ExplosivesLab upgraded: bigger debris footprint and longer reach.".to_string())
    }
}

/// Jump anywhere discovered, once per turn. Level 2 makes the jump
/// instant — it no longer consumes the turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpDrive {
    pub level: u8,
    pub upgrade_cost: f32,
    pub used_this_turn: bool,
}

impl WarpDrive {
    pub fn new(cfg: &AddonConfig) -> Self {
        Self {
            level: 1,
            upgrade_cost: cfg.upgrade_cost,
            used_this_turn: false,
        }
    }

    pub fn instant(&self) -> bool {
        self.level >= 2
    }

    pub fn upgrade(&mut self, money: &mut f32) -> Result<String, ActionError> {
        check_upgrade(ModuleKind::WarpDrive, ADDON_LEVEL_CAP, self.level, self.upgrade_cost, *money)?;
        *money -= self.upgrade_cost;
        self.level = 2;
        Ok("WarpDrive upgraded: one jump per turn is now instant.".to_string())
    }
}

// ---------------------------------------------------------------------------
// Typed registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleSet {
    pub drill: Option<Drill>,
    pub telescope: Option<Telescope>,
    pub reactor: Option<Reactor>,
    pub launch_bay: Option<LaunchBay>,
    pub factory: Option<Factory>,
    pub ice_penetrator: Option<IcePenetrator>,
    pub fusion_reactor: Option<FusionReactor>,
    pub explosives_lab: Option<ExplosivesLab>,
    pub warp_drive: Option<WarpDrive>,
}

impl ModuleSet {
    /// The five starting modules every player is constructed with.
    pub fn base(rules: &Rules) -> Self {
        Self {
            drill: Some(Drill::new(&rules.drill)),
            telescope: Some(Telescope::new(&rules.telescope)),
            reactor: Some(Reactor::new(&rules.reactor)),
            launch_bay: Some(LaunchBay::new(&rules.launch_bay)),
            factory: Some(Factory::new(&rules.factory)),
            ..Self::default()
        }
    }

    pub fn installed_count(&self) -> usize {
        usize::from(self.drill.is_some())
            + usize::from(self.telescope.is_some())
            + usize::from(self.reactor.is_some())
            + usize::from(self.launch_bay.is_some())
            + usize::from(self.factory.is_some())
            + usize::from(self.ice_penetrator.is_some())
            + usize::from(self.fusion_reactor.is_some())
            + usize::from(self.explosives_lab.is_some())
            + usize::from(self.warp_drive.is_some())
    }

    pub fn has(&self, kind: ModuleKind) -> bool {
        match kind {
            ModuleKind::Drill => self.drill.is_some(),
            ModuleKind::Telescope => self.telescope.is_some(),
            ModuleKind::Reactor => self.reactor.is_some(),
            ModuleKind::LaunchBay => self.launch_bay.is_some(),
            ModuleKind::Factory => self.factory.is_some(),
            ModuleKind::IcePenetrator => self.ice_penetrator.is_some(),
            ModuleKind::FusionReactor => self.fusion_reactor.is_some(),
            ModuleKind::ExplosivesLab => self.explosives_lab.is_some(),
            ModuleKind::WarpDrive => self.warp_drive.is_some(),
        }
    }

    /// Build price of a not-yet-owned module of this kind.
    pub fn build_cost(kind: ModuleKind, rules: &Rules) -> f32 {
        match kind {
            ModuleKind::Drill => rules.drill.build_cost,
            ModuleKind::Telescope => rules.telescope.build_cost,
            ModuleKind::Reactor => rules.reactor.build_cost,
            ModuleKind::LaunchBay => rules.launch_bay.build_cost,
            ModuleKind::Factory => rules.factory.build_cost,
            ModuleKind::IcePenetrator => rules.ice_penetrator.build_cost,
            ModuleKind::FusionReactor => rules.fusion_reactor.build_cost,
            ModuleKind::ExplosivesLab => rules.explosives_lab.build_cost,
            ModuleKind::WarpDrive => rules.warp_drive.build_cost,
        }
    }

    /// Install a freshly built module at base stats. Callers check
    /// ownership and slot limits first.
    pub fn install(&mut self, kind: ModuleKind, rules: &Rules) {
        match kind {
            ModuleKind::Drill => self.drill = Some(Drill::new(&rules.drill)),
            ModuleKind::Telescope => self.telescope = Some(Telescope::new(&rules.telescope)),
            ModuleKind::Reactor => self.reactor = Some(Reactor::new(&rules.reactor)),
            ModuleKind::LaunchBay => self.launch_bay = Some(LaunchBay::new(&rules.launch_bay)),
            ModuleKind::Factory => self.factory = Some(Factory::new(&rules.factory)),
            ModuleKind::IcePenetrator => {
                self.ice_penetrator = Some(IcePenetrator::new(&rules.ice_penetrator));
            }
            ModuleKind::FusionReactor => {
                self.fusion_reactor = Some(FusionReactor::new(&rules.fusion_reactor));
            }
            ModuleKind::ExplosivesLab => {
                self.explosives_lab = Some(ExplosivesLab::new(&rules.explosives_lab));
            }
            ModuleKind::WarpDrive => self.warp_drive = Some(WarpDrive::new(&rules.warp_drive)),
        }
    }

    /// Drop the module outright — the capability is gone, no refund.
    /// Returns false when nothing of that kind was installed.
    pub fn remove(&mut self, kind: ModuleKind) -> bool {
        let present = self.has(kind);
        match kind {
            ModuleKind::Drill => self.drill = None,
            ModuleKind::Telescope => self.telescope = None,
            ModuleKind::Reactor => self.reactor = None,
            ModuleKind::LaunchBay => self.launch_bay = None,
            ModuleKind::Factory => self.factory = None,
            ModuleKind::IcePenetrator => self.ice_penetrator = None,
            ModuleKind::FusionReactor => self.fusion_reactor = None,
            ModuleKind::ExplosivesLab => self.explosives_lab = None,
            ModuleKind::WarpDrive => self.warp_drive = None,
        }
        present
    }

    /// Per-turn resets: factory production quota and the warp-jump flag.
    pub fn next_turn(&mut self) {
        if let Some(factory) = &mut self.factory {
            factory.robots_produced_this_turn = 0;
        }
        if let Some(warp) = &mut self.warp_drive {
            warp.used_this_turn = false;
        }
    }
}
