//! RenderProxy: описание визуала для simulated body
//!
//! Симуляция не знает про меши. Клиент видит RenderProxy на entity,
//! спавнит отдельный visual entity и раз в кадр копирует Transform тела.
//! Зависимость строго односторонняя: visual читает body, не наоборот.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum ProxyShape {
    Sphere { radius: f32 },
    /// Цилиндр вдоль локальной оси Y
    Cylinder { radius: f32, length: f32 },
    Cuboid { half_extents: Vec3 },
}

/// Какой материал выбрать клиенту
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ProxyMaterial {
    Ball,
    /// Непрозрачный материал рамы
    Post,
    /// Полупрозрачный материал сетки
    Net,
    Pitch,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RenderProxy {
    pub shape: ProxyShape,
    pub material: ProxyMaterial,
}

impl RenderProxy {
    pub fn sphere(radius: f32, material: ProxyMaterial) -> Self {
        Self {
            shape: ProxyShape::Sphere { radius },
            material,
        }
    }

    pub fn cylinder(radius: f32, length: f32, material: ProxyMaterial) -> Self {
        Self {
            shape: ProxyShape::Cylinder { radius, length },
            material,
        }
    }

    pub fn cuboid(half_extents: Vec3, material: ProxyMaterial) -> Self {
        Self {
            shape: ProxyShape::Cuboid { half_extents },
            material,
        }
    }
}
