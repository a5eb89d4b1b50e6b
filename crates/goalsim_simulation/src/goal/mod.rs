//! Ворота: static рама + сетка
//!
//! Стратегия сетки выбирается конфигом (NetStrategy), одна на сцену:
//! - ChainLink: задняя сетка из цепочек на joint'ах, бока и верх static
//! - StaticPanels: все панели static
//!
//! Ворота создаются один раз при setup и живут до конца сцены.

use bevy::prelude::*;

use crate::config::{GoalConfig, GoalDimensions, NetConfig, NetStrategy};
use crate::error::Result;
use crate::logger;

pub mod frame;
pub mod net;
pub mod panels;


pub use frame::{frame_layout, spawn_frame, FrameBar, FrameBarSpec, FrameBarTag, GoalFrame};
pub use net::{
    plan_back_net, plan_chain, spawn_chain, AnchorBar, ChainParent, ChainPlan, NetChain, NetLayout, NetLink,
    NetSegment, SegmentPlan,
};
pub use panels::{spawn_static_panel, static_panel_layout, NetPanel, NetPanelTag, StaticPanelSpec};

/// Корневая entity ворот
#[derive(Component, Debug, Clone, Copy)]
pub struct Goal {
    pub position: Vec3,
    pub dimensions: GoalDimensions,
}

/// Handles сетки
#[derive(Component, Debug, Clone, Default)]
pub struct GoalNet {
    pub chains: Vec<NetChain>,
    pub panels: Vec<Entity>,
}

impl GoalNet {
    pub fn joint_count(&self) -> usize {
        self.chains.iter().map(|chain| chain.segments.len()).sum()
    }
}

/// Spawn ворот: рама, затем сетка
///
/// Планы цепочек считаются до spawn: невалидный joint → Err, в мире
/// ничего не появляется.
pub fn spawn_goal(commands: &mut Commands, goal: &GoalConfig, net: &NetConfig) -> Result<Entity> {
    let position = goal.position();
    let dims = goal.dimensions;

    let layout = NetLayout::new(&dims, net);
    let back_top = frame_layout(position, &dims)
        .into_iter()
        .find(|spec| spec.bar == FrameBar::BackTopBar);

    let chain_plans = match (net.strategy, back_top) {
        (NetStrategy::ChainLink, Some(anchor_spec)) => {
            let anchor = AnchorBar {
                translation: anchor_spec.translation,
                rotation: anchor_spec.rotation,
            };
            plan_back_net(&layout, position, &dims, &anchor)?
        }
        _ => Vec::new(),
    };

    let frame = spawn_frame(commands, position, &dims);
    let anchor_entity = frame.bar(FrameBar::BackTopBar);

    let chains: Vec<NetChain> = chain_plans
        .iter()
        .enumerate()
        .map(|(index, plan)| spawn_chain(commands, plan, index, anchor_entity, net))
        .collect();

    let panels: Vec<Entity> = static_panel_layout(position, &dims, net.thickness, net.strategy)
        .iter()
        .map(|spec| spawn_static_panel(commands, spec))
        .collect();

    let goal_net = GoalNet { chains, panels };

    logger::log_info(&format!(
        "Goal built at {:?}: {} bars, {:?} net, {} chains, {} joints, {} static panels",
        position,
        FrameBar::ALL.len(),
        net.strategy,
        goal_net.chains.len(),
        goal_net.joint_count(),
        goal_net.panels.len()
    ));

    let root = commands
        .spawn((
            Goal {
                position,
                dimensions: dims,
            },
            Name::new("goal"),
            frame,
            goal_net,
        ))
        .id();

    Ok(root)
}
