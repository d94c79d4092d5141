use bevy::prelude::*;
use crate::economy::wallet::Economy;
use crate::shared::*;
use super::hud::format_balance;
use super::UiFontHandle;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct ShopScreenRoot;

#[derive(Component)]
pub struct ShopBalanceText;

#[derive(Component)]
pub struct ShopListItem {
    pub index: usize,
}

const AFFORDABLE: Color = Color::srgb(0.95, 0.95, 0.9);
const UNAFFORDABLE: Color = Color::srgb(0.55, 0.45, 0.45);

pub fn listing_line(index: usize, listing: &ShopListing) -> String {
    format!(
        "{}. {}: {} {} for {} {}",
        index + 1,
        listing.name,
        listing.grant,
        listing.grant_kind.label(),
        listing.cost,
        listing.cost_kind.label(),
    )
}

fn balances_line(economy: &Economy) -> String {
    ResourceKind::ALL
        .iter()
        .map(|kind| format_balance(*kind, economy.balance(*kind)))
        .collect::<Vec<_>>()
        .join("   ")
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_shop_screen(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    catalog: Res<ShopCatalog>,
    economy: Res<Economy>,
) {
    let font = font_handle.0.clone();
    let text_font = |size: f32| TextFont {
        font: font.clone(),
        font_size: size,
        ..default()
    };

    commands
        .spawn((
            ShopScreenRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(520.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(16.0)),
                        row_gap: Val::Px(8.0),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.18, 0.13, 0.09)),
                    BorderColor(Color::srgb(0.6, 0.45, 0.25)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new("GENERAL STORE"),
                        text_font(20.0),
                        TextColor(Color::srgb(1.0, 0.84, 0.0)),
                    ));
                    panel.spawn((
                        ShopBalanceText,
                        Text::new(balances_line(&economy)),
                        text_font(14.0),
                        TextColor(Color::srgb(1.0, 0.84, 0.0)),
                    ));

                    for (index, listing) in catalog.listings.iter().enumerate() {
                        let color = if economy.can_afford(listing.cost_kind, listing.cost) {
                            AFFORDABLE
                        } else {
                            UNAFFORDABLE
                        };
                        panel.spawn((
                            ShopListItem { index },
                            Text::new(listing_line(index, listing)),
                            text_font(15.0),
                            TextColor(color),
                        ));
                    }

                    panel.spawn((
                        Text::new("1-9: Buy | B/Esc: Leave"),
                        text_font(11.0),
                        TextColor(Color::srgb(0.7, 0.7, 0.7)),
                    ));
                });
        });
}

pub fn despawn_shop_screen(mut commands: Commands, query: Query<Entity, With<ShopScreenRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════

/// Refresh balances and grey out listings the player can no longer afford.
pub fn update_shop_display(
    economy: Res<Economy>,
    catalog: Res<ShopCatalog>,
    mut balance_query: Query<&mut Text, (With<ShopBalanceText>, Without<ShopListItem>)>,
    mut item_query: Query<(&ShopListItem, &mut TextColor)>,
) {
    if !economy.is_changed() {
        return;
    }
    for mut text in &mut balance_query {
        **text = balances_line(&economy);
    }
    for (item, mut color) in &mut item_query {
        let Some(listing) = catalog.listings.get(item.index) else {
            continue;
        };
        color.0 = if economy.can_afford(listing.cost_kind, listing.cost) {
            AFFORDABLE
        } else {
            UNAFFORDABLE
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_line_is_one_based() {
        let listing = ShopListing {
            id: "seed_bundle".to_string(),
            name: "Seed Bundle".to_string(),
            cost_kind: ResourceKind::Funds,
            cost: 40,
            grant_kind: ResourceKind::Seeds,
            grant: 5,
        };
        let line = listing_line(1, &listing);
        assert!(line.starts_with("2. Seed Bundle"), "{line}");
        assert!(line.contains("40"));
    }
}
