use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .init_resource::<PlayerInput>()
            .init_resource::<InputContext>()
            .add_systems(
                PreUpdate,
                (reset_and_read_input, manage_input_context).chain(),
            );
    }
}

/// Rebindable keys. Arrow keys always mirror the movement bindings.
#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub interact: KeyCode,
    pub tool_use: KeyCode,
    pub tool_next: KeyCode,
    pub tool_prev: KeyCode,
    pub context_tool: KeyCode,
    pub sleep: KeyCode,
    pub open_shop: KeyCode,
    pub pause: KeyCode,
    pub quicksave: KeyCode,
    pub quickload: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            interact: KeyCode::KeyF,
            tool_use: KeyCode::Space,
            tool_next: KeyCode::KeyE,
            tool_prev: KeyCode::KeyQ,
            context_tool: KeyCode::Digit0,
            sleep: KeyCode::KeyN,
            open_shop: KeyCode::KeyB,
            pause: KeyCode::Escape,
            quicksave: KeyCode::F5,
            quickload: KeyCode::F9,
        }
    }
}

/// Which set of actions the keyboard currently drives.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Disabled,
    Gameplay,
    Menu,
}

/// This frame's game actions, rebuilt from scratch every PreUpdate.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// One-tile cursor step, from a key pressed this frame.
    pub cursor_step: IVec2,
    pub interact: bool,
    pub tool_next: bool,
    pub tool_prev: bool,
    /// 0-based slot from the digit row (Digit1 → 0).
    pub slot: Option<u8>,
    pub context_tool: bool,
    pub sleep: bool,
    pub open_shop: bool,
    pub pause: bool,
    pub quicksave: bool,
    pub quickload: bool,
    pub ui_cancel: bool,
}

const SLOT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// The single point where hardware input becomes game actions.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    if *context == InputContext::Disabled {
        return;
    }

    input.slot = SLOT_KEYS
        .iter()
        .position(|key| keys.just_pressed(*key))
        .map(|i| i as u8);
    input.pause = keys.just_pressed(bindings.pause);
    input.open_shop = keys.just_pressed(bindings.open_shop);
    input.quicksave = keys.just_pressed(bindings.quicksave);
    input.quickload = keys.just_pressed(bindings.quickload);

    match *context {
        InputContext::Disabled => {}

        InputContext::Gameplay => {
            let mut step = IVec2::ZERO;
            if keys.just_pressed(bindings.move_up) || keys.just_pressed(KeyCode::ArrowUp) {
                step.y += 1;
            }
            if keys.just_pressed(bindings.move_down) || keys.just_pressed(KeyCode::ArrowDown) {
                step.y -= 1;
            }
            if keys.just_pressed(bindings.move_left) || keys.just_pressed(KeyCode::ArrowLeft) {
                step.x -= 1;
            }
            if keys.just_pressed(bindings.move_right) || keys.just_pressed(KeyCode::ArrowRight) {
                step.x += 1;
            }
            input.cursor_step = step;

            input.interact =
                keys.just_pressed(bindings.interact) || keys.just_pressed(bindings.tool_use);
            input.tool_next = keys.just_pressed(bindings.tool_next);
            input.tool_prev = keys.just_pressed(bindings.tool_prev);
            input.context_tool = keys.just_pressed(bindings.context_tool);
            input.sleep = keys.just_pressed(bindings.sleep);
        }

        InputContext::Menu => {
            input.ui_cancel = input.pause;
        }
    }
}

/// Derives InputContext from GameState.
fn manage_input_context(
    game_state: Res<State<GameState>>,
    mut context: ResMut<InputContext>,
) {
    *context = context_for(*game_state.get());
}

pub fn context_for(state: GameState) -> InputContext {
    match state {
        GameState::Loading => InputContext::Disabled,
        GameState::Playing => InputContext::Gameplay,
        GameState::Paused | GameState::Shop => InputContext::Menu,
    }
}
