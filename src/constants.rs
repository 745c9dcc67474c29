// Unit and range constants for the Mini Maestro variants.
// See https://www.pololu.com/docs/0J40 for the controller documentation.

// --- Analog / PWM output units ---
// Generic analog writes arrive as a byte and are remapped onto the
// controller's 0..=1024 duty cycle scale.
pub const ANALOG_VALUE_MAX: u16 = 255;
pub const DUTY_CYCLE_MAX: u16 = 1024;
// The PWM period is fixed; only the duty cycle varies per write.
pub const PWM_PERIOD: u16 = 16320;

// --- Servo pulse widths ---
// Servo targets are expressed in quarter-microsecond units. 640..=2304
// covers the standard hobby servo range, mapped from 0..=180 degrees.
pub const SERVO_DEGREES_MAX: u16 = 180;
pub const SERVO_PULSE_MIN: u16 = 640;
pub const SERVO_PULSE_MAX: u16 = 2304;

// --- Capability table layout ---
// Pins below this index can be read as analog inputs, the rest are
// digital inputs.
pub const ANALOG_PIN_COUNT: u8 = 12;
// Sentinel analog channel for pins without analog support.
pub const NO_ANALOG_CHANNEL: u8 = 127;
// Each variant exposes PWM on exactly one channel.
pub const PWM_PIN_MINI_12: u8 = 8;
pub const PWM_PIN_MINI_18_24: u8 = 12;
