//! Collision groups для сцены
//!
//! ## Слои (memberships):
//! - GROUP_1: Ball
//! - GROUP_2: Frame (штанги, перекладина, задняя рама)
//! - GROUP_3: Net segments (динамические цепочки)
//! - GROUP_4: Pitch (газон)
//! - GROUP_5: Net panels (static боковые/верхняя сетки)
//!
//! Рама и static панели не видят сегменты сетки: крайние цепочки
//! касаются задних штанг уже при spawn. Фильтр шире, чем один hinge
//! (штанга ↔ сегмент 0): сегменты проходят сквозь любые штанги рамы,
//! включая задние стойки, и сквозь static панели. Держит сетку только
//! joint к задней верхней штанге, мяч при этом коллайдит со всем.

use bevy_rapier3d::prelude::{CollisionGroups, Group};

pub const LAYER_BALL: Group = Group::GROUP_1;
pub const LAYER_FRAME: Group = Group::GROUP_2;
pub const LAYER_NET: Group = Group::GROUP_3;
pub const LAYER_PITCH: Group = Group::GROUP_4;
pub const LAYER_NET_PANEL: Group = Group::GROUP_5;

/// Мяч коллайдит со всем
pub fn ball_groups() -> CollisionGroups {
    CollisionGroups::new(
        LAYER_BALL,
        LAYER_BALL | LAYER_FRAME | LAYER_NET | LAYER_PITCH | LAYER_NET_PANEL,
    )
}

pub fn frame_groups() -> CollisionGroups {
    CollisionGroups::new(LAYER_FRAME, LAYER_BALL | LAYER_PITCH)
}

/// Сегменты: мяч, другие сегменты, газон
pub fn net_segment_groups() -> CollisionGroups {
    CollisionGroups::new(LAYER_NET, LAYER_BALL | LAYER_NET | LAYER_PITCH)
}

pub fn net_panel_groups() -> CollisionGroups {
    CollisionGroups::new(LAYER_NET_PANEL, LAYER_BALL)
}

pub fn pitch_groups() -> CollisionGroups {
    CollisionGroups::new(LAYER_PITCH, LAYER_BALL | LAYER_NET)
}
