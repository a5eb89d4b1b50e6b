//! JointSpec: типизированное описание joint'а между двумя телами
//!
//! Hinge: 1 вращательная степень свободы вокруг оси (ткань висит на штанге).
//! BallSocket: 3 вращательные степени свободы (свободное покачивание).
//! Anchor'ы и оси: в локальных координатах каждого тела.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::error::{GoalSimError, Result};

/// Точки крепления joint'а (local frame родителя / ребёнка)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointAnchors {
    pub on_parent: Vec3,
    pub on_child: Vec3,
}

impl JointAnchors {
    pub fn new(on_parent: Vec3, on_child: Vec3) -> Self {
        Self { on_parent, on_child }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointKind {
    Hinge,
    BallSocket,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointSpec {
    Hinge {
        /// Ось вращения в local frame родителя (normalized)
        axis_on_parent: Vec3,
        /// Та же ось в local frame ребёнка (normalized)
        axis_on_child: Vec3,
        anchors: JointAnchors,
        contacts_enabled: bool,
    },
    BallSocket {
        anchors: JointAnchors,
        contacts_enabled: bool,
    },
}

impl JointSpec {
    /// Hinge с валидацией: anchor'ы конечные, оси ненулевые
    pub fn hinge(
        axis_on_parent: Vec3,
        axis_on_child: Vec3,
        anchors: JointAnchors,
        contacts_enabled: bool,
    ) -> Result<Self> {
        validate_anchors(&anchors)?;
        let axis_on_parent = normalize_axis("parent", axis_on_parent)?;
        let axis_on_child = normalize_axis("child", axis_on_child)?;

        Ok(Self::Hinge {
            axis_on_parent,
            axis_on_child,
            anchors,
            contacts_enabled,
        })
    }

    pub fn ball_socket(anchors: JointAnchors, contacts_enabled: bool) -> Result<Self> {
        validate_anchors(&anchors)?;

        Ok(Self::BallSocket {
            anchors,
            contacts_enabled,
        })
    }

    pub fn kind(&self) -> JointKind {
        match self {
            JointSpec::Hinge { .. } => JointKind::Hinge,
            JointSpec::BallSocket { .. } => JointKind::BallSocket,
        }
    }

    pub fn anchors(&self) -> JointAnchors {
        match self {
            JointSpec::Hinge { anchors, .. } | JointSpec::BallSocket { anchors, .. } => *anchors,
        }
    }

    /// Коллайдят ли соединённые тела друг с другом
    pub fn contacts_enabled(&self) -> bool {
        match self {
            JointSpec::Hinge {
                contacts_enabled, ..
            }
            | JointSpec::BallSocket {
                contacts_enabled, ..
            } => *contacts_enabled,
        }
    }

    /// Конвертация в Rapier joint (для ImpulseJoint на ребёнке)
    ///
    /// ImpulseJoint принимает только TypedJoint: оси выставлены вручную,
    /// поэтому заворачиваем как GenericJoint.
    pub fn to_rapier(&self) -> TypedJoint {
        let joint = match *self {
            JointSpec::Hinge {
                axis_on_parent,
                axis_on_child,
                anchors,
                contacts_enabled,
            } => {
                let mut joint: GenericJoint = RevoluteJointBuilder::new(axis_on_parent)
                    .local_anchor1(anchors.on_parent)
                    .local_anchor2(anchors.on_child)
                    .build()
                    .into();
                // Локальные frames родителя и ребёнка могут быть повёрнуты по-разному
                joint.set_local_axis1(axis_on_parent);
                joint.set_local_axis2(axis_on_child);
                joint.set_contacts_enabled(contacts_enabled);
                joint
            }
            JointSpec::BallSocket {
                anchors,
                contacts_enabled,
            } => {
                let mut joint: GenericJoint = SphericalJointBuilder::new()
                    .local_anchor1(anchors.on_parent)
                    .local_anchor2(anchors.on_child)
                    .build()
                    .into();
                joint.set_contacts_enabled(contacts_enabled);
                joint
            }
        };

        TypedJoint::GenericJoint(joint)
    }
}

fn validate_anchors(anchors: &JointAnchors) -> Result<()> {
    if !anchors.on_parent.is_finite() {
        return Err(GoalSimError::invalid_joint(format!(
            "parent anchor is not finite: {:?}",
            anchors.on_parent
        )));
    }
    if !anchors.on_child.is_finite() {
        return Err(GoalSimError::invalid_joint(format!(
            "child anchor is not finite: {:?}",
            anchors.on_child
        )));
    }
    Ok(())
}

fn normalize_axis(side: &str, axis: Vec3) -> Result<Vec3> {
    axis.try_normalize().ok_or_else(|| {
        GoalSimError::invalid_joint(format!("{} hinge axis must be non-zero and finite, got {:?}", side, axis))
    })
}
