//! Movement domain: ground sensing.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, MovementTuning, Player, PlayerState};

/// Downward probe beneath the feet plus one probe at each footprint edge.
/// The OR of the three tolerates standing at a ledge with partial footing.
/// Pure query: repeated calls within a tick agree if the world hasn't moved.
pub(crate) fn probe_grounded(
    spatial_query: &SpatialQuery,
    feet: Vec2,
    tuning: &MovementTuning,
) -> bool {
    let filter = SpatialQueryFilter::from_mask(GameLayer::Ground);
    let distance = tuning.ground_probe_distance;
    let spread = Vec2::new(tuning.ground_probe_spread, 0.0);

    let hits = |origin: Vec2| {
        spatial_query
            .cast_ray(origin, Dir2::NEG_Y, distance, true, &filter)
            .is_some()
    };

    hits(feet) || hits(feet + spread) || hits(feet - spread)
}

/// Caches the ground probe result once per tick, before anything reads it.
pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    tuning: Res<MovementTuning>,
    mut query: Query<(&Transform, &Collider, &mut PlayerState), With<Player>>,
) {
    for (transform, collider, mut state) in &mut query {
        let was_on_ground = state.on_ground;

        let half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 24.0,
        };
        let feet = transform.translation.truncate() - Vec2::new(0.0, half_height);

        state.on_ground = probe_grounded(&spatial_query, feet, &tuning);

        if state.on_ground != was_on_ground {
            debug!("Ground contact changed: on_ground={}", state.on_ground);
        }
    }
}
