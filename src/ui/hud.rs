use bevy::prelude::*;
use crate::calendar::DayClock;
use crate::economy::wallet::{format_funds, Economy};
use crate::farming::Field;
use crate::player::{action_at, FieldCursor};
use crate::shared::*;
use super::UiFontHandle;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS — used to query and update HUD elements
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudTimeText;

/// One balance readout per resource kind.
#[derive(Component)]
pub struct HudBalanceText {
    pub kind: ResourceKind,
}

/// Cursor position, tile condition, and the tool that interact would use.
#[derive(Component)]
pub struct HudToolText;

#[derive(Component)]
pub struct HudObjective;

// ═══════════════════════════════════════════════════════════════════════
// TEXT FORMATTING
// ═══════════════════════════════════════════════════════════════════════

pub fn format_day_line(clock: &DayClock) -> String {
    let (hour, minute) = clock.clock_time();
    let paused = if clock.paused { " (paused)" } else { "" };
    format!("Day {} - {:02}:{:02}{}", clock.day, hour, minute, paused)
}

pub fn format_balance(kind: ResourceKind, amount: u32) -> String {
    match kind {
        ResourceKind::Funds => format_funds(amount),
        _ => format!("{} {}", kind.label(), amount),
    }
}

pub fn format_tool_line(cursor: &FieldCursor, field: &Field) -> String {
    let Some(tile) = field.get(cursor.x, cursor.y) else {
        return "No field".to_string();
    };
    let tool = match cursor.tool {
        Some(action) => action.label().to_string(),
        None => match action_at(cursor, field) {
            Some(action) => format!("Auto: {}", action.label()),
            None => "Auto".to_string(),
        },
    };
    format!("({}, {}) {} | {}", cursor.x, cursor.y, tile.condition.label(), tool)
}

const OBJECTIVE: &str = "Grow the whole field to harvest at once";

fn hud_text(text: String, font: &Handle<Font>, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font: font.clone(),
            font_size: size,
            ..default()
        },
        TextColor(color),
        PickingBehavior::IGNORE,
    )
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN HUD
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    clock: Res<DayClock>,
    economy: Res<Economy>,
    cursor: Res<FieldCursor>,
    field: Res<Field>,
) {
    let font = font_handle.0.clone();
    let objective = if economy.has_flag(ProgressFlag::FieldInBloom) {
        "The field is in bloom. You win!"
    } else {
        OBJECTIVE
    };

    // Root container — full screen overlay, no interaction blocking
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            // ─── TOP BAR ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(44.0),
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::SpaceBetween,
                        align_items: AlignItems::Center,
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|top_bar| {
                    top_bar.spawn((
                        HudTimeText,
                        hud_text(format_day_line(&clock), &font, 16.0, Color::WHITE),
                    ));

                    top_bar
                        .spawn((
                            Node {
                                flex_direction: FlexDirection::Row,
                                align_items: AlignItems::Center,
                                column_gap: Val::Px(16.0),
                                ..default()
                            },
                            PickingBehavior::IGNORE,
                        ))
                        .with_children(|balances| {
                            for kind in ResourceKind::ALL {
                                balances.spawn((
                                    HudBalanceText { kind },
                                    hud_text(
                                        format_balance(kind, economy.balance(kind)),
                                        &font,
                                        16.0,
                                        Color::srgb(1.0, 0.84, 0.0),
                                    ),
                                ));
                            }
                        });
                });

            parent.spawn((
                HudObjective,
                hud_text(objective.to_string(), &font, 13.0, Color::srgb(0.9, 0.9, 0.8)),
            ));

            // ─── BOTTOM BAR ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(8.0)),
                        row_gap: Val::Px(2.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.45)),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|bottom| {
                    bottom.spawn((
                        HudToolText,
                        hud_text(format_tool_line(&cursor, &field), &font, 15.0, Color::WHITE),
                    ));
                    bottom.spawn(hud_text(
                        "WASD: Move | F/Space: Use | 1-4 Tool, 0 Auto | N: Sleep | B: Shop | F5/F9: Save/Load"
                            .to_string(),
                        &font,
                        11.0,
                        Color::srgb(0.7, 0.7, 0.7),
                    ));
                });
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════

pub fn update_time_display(
    clock: Res<DayClock>,
    mut query: Query<&mut Text, With<HudTimeText>>,
) {
    if !clock.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = format_day_line(&clock);
    }
}

/// Balances only change through the economy, which announces each one.
pub fn update_balance_display(
    mut changed_events: EventReader<EconomyChangedEvent>,
    mut query: Query<(&HudBalanceText, &mut Text)>,
) {
    for ev in changed_events.read() {
        for (balance_text, mut text) in &mut query {
            if balance_text.kind == ev.kind {
                **text = format_balance(ev.kind, ev.balance);
            }
        }
    }
}

pub fn update_tool_display(
    cursor: Res<FieldCursor>,
    field: Res<Field>,
    mut query: Query<&mut Text, With<HudToolText>>,
) {
    if !cursor.is_changed() && !field.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = format_tool_line(&cursor, &field);
    }
}

pub fn update_objective_display(
    mut won_events: EventReader<GameWonEvent>,
    mut query: Query<(&mut Text, &mut TextColor), With<HudObjective>>,
) {
    let Some(ev) = won_events.read().last() else {
        return;
    };
    for (mut text, mut color) in &mut query {
        **text = format!("The field is in bloom on day {}. You win!", ev.day);
        color.0 = Color::srgb(1.0, 0.84, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_line_shows_clock() {
        let mut clock = DayClock::new(60.0);
        assert_eq!(format_day_line(&clock), "Day 1 - 06:00");
        clock.paused = true;
        assert!(format_day_line(&clock).ends_with("(paused)"));
    }

    #[test]
    fn test_balance_formatting() {
        assert_eq!(format_balance(ResourceKind::Funds, 1500), "1,500g");
        assert_eq!(
            format_balance(ResourceKind::Seeds, 3),
            format!("{} 3", ResourceKind::Seeds.label())
        );
    }

    #[test]
    fn test_tool_line_context_mode() {
        let field = Field::new(2, 2);
        let cursor = FieldCursor::default();
        let line = format_tool_line(&cursor, &field);
        assert!(line.contains("Auto: Hoe"), "{line}");
        let off = FieldCursor { x: 9, ..cursor };
        assert_eq!(format_tool_line(&off, &field), "No field");
    }
}
